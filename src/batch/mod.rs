//! Sequential batch execution
//!
//! Runs independent tasks one after another and records a per-task
//! `Result`. A failed task is logged and recorded; the batch carries on.

mod runner;
mod types;

pub use runner::BatchRunner;
pub use types::{BatchReport, TaskHandler, TaskOutcome};
