// Allow common clippy pedantic lints
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! repo-janitor CLI
//!
//! List and bulk-delete GitHub repositories

use clap::Parser;
use repo_janitor::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    // .env values feed clap's env fallbacks
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
