//! Batch types and traits

use crate::error::Result;
use async_trait::async_trait;

/// Executes one task of a batch
#[async_trait]
pub trait TaskHandler<T: Send + Sync>: Send + Sync {
    /// Value produced by a successful task
    type Output: Send;

    /// Run a single task
    async fn handle(&self, task: &T) -> Result<Self::Output>;
}

/// A task together with what happened to it
#[derive(Debug)]
pub struct TaskOutcome<T, O> {
    /// The task as submitted
    pub task: T,
    /// Its result
    pub result: Result<O>,
}

impl<T, O> TaskOutcome<T, O> {
    /// Whether the task succeeded
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in submission order
#[derive(Debug)]
pub struct BatchReport<T, O> {
    outcomes: Vec<TaskOutcome<T, O>>,
}

impl<T, O> Default for BatchReport<T, O> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<T, O> BatchReport<T, O> {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome
    pub fn push(&mut self, outcome: TaskOutcome<T, O>) {
        self.outcomes.push(outcome);
    }

    /// All outcomes
    pub fn outcomes(&self) -> &[TaskOutcome<T, O>] {
        &self.outcomes
    }

    /// Number of tasks run
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no task was run
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Successful outcomes
    pub fn succeeded(&self) -> impl Iterator<Item = &TaskOutcome<T, O>> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Failed outcomes
    pub fn failed(&self) -> impl Iterator<Item = &TaskOutcome<T, O>> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of successful tasks
    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    /// Number of failed tasks
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    /// True when every task succeeded
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}
