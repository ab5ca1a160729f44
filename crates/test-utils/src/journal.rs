use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One observable step of a reload cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Arm,
    Disarm,
    Build,
    Stop,
    Start,
}

/// Shared, ordered record of the steps taken by the fakes.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    steps: Arc<Mutex<Vec<Step>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, step: Step) {
        self.steps.lock().unwrap().push(step);
    }

    pub fn steps(&self) -> Vec<Step> {
        self.steps.lock().unwrap().clone()
    }

    pub fn count(&self, step: Step) -> usize {
        self.steps.lock().unwrap().iter().filter(|s| **s == step).count()
    }

    /// Poll until `pred` holds for the recorded steps.
    ///
    /// Meant to be wrapped in `with_timeout`.
    pub async fn wait_until<F>(&self, pred: F)
    where
        F: Fn(&[Step]) -> bool,
    {
        loop {
            if pred(&self.steps()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Wait until the watcher has been armed `n` times in total.
    pub async fn wait_for_arms(&self, n: usize) {
        self.wait_until(|steps| steps.iter().filter(|s| **s == Step::Arm).count() >= n)
            .await
    }
}
