//! Batch runner implementation

use super::types::{BatchReport, TaskHandler, TaskOutcome};
use std::fmt::Display;
use tracing::{error, info};

/// Runs tasks sequentially, never stopping on a failure
#[derive(Debug, Clone)]
pub struct BatchRunner {
    label: String,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new("task")
    }
}

impl BatchRunner {
    /// Create a runner; `label` names the operation in log lines
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Run every task in order and collect the outcomes
    pub async fn run<T, H>(
        &self,
        tasks: impl IntoIterator<Item = T>,
        handler: &H,
    ) -> BatchReport<T, H::Output>
    where
        T: Display + Send + Sync,
        H: TaskHandler<T>,
    {
        let tasks: Vec<T> = tasks.into_iter().collect();
        let total = tasks.len();
        let mut report = BatchReport::new();

        info!("Starting {} batch of {total} tasks", self.label);

        for (index, task) in tasks.into_iter().enumerate() {
            info!("[{}/{total}] {} {task}", index + 1, self.label);

            let result = handler.handle(&task).await;
            match &result {
                Ok(_) => info!("{} succeeded for {task}", self.label),
                Err(e) => error!("{} failed for {task}: {e}", self.label),
            }

            report.push(TaskOutcome { task, result });
        }

        info!(
            "{} batch completed: {} succeeded, {} failed",
            self.label,
            report.success_count(),
            report.failure_count()
        );
        report
    }
}
