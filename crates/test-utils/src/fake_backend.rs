use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use raptor_dev::errors::{DevError, Result};
use raptor_dev::exec::{BuildFailure, BuildOutcome, CycleBackend};

use crate::journal::{Journal, Step};

/// A fake backend that:
/// - records build/stop/start calls in a [`Journal`]
/// - returns scripted build results (success once the script runs out)
/// - tracks whether a "process" is live and flags any start over a live one.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    journal: Journal,
    outcomes: Arc<Mutex<VecDeque<bool>>>,
    live: Arc<Mutex<bool>>,
    overlapping_starts: Arc<Mutex<usize>>,
    fail_start: bool,
}

impl FakeBackend {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            live: Arc::new(Mutex::new(false)),
            overlapping_starts: Arc::new(Mutex::new(0)),
            fail_start: false,
        }
    }

    /// Script the next build results, in order.
    pub fn with_builds(self, outcomes: &[bool]) -> Self {
        self.outcomes.lock().unwrap().extend(outcomes.iter().copied());
        self
    }

    /// Make every `start` fail like a missing artifact would.
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn is_live(&self) -> bool {
        *self.live.lock().unwrap()
    }

    /// Number of starts issued while a previous instance was still live.
    pub fn overlapping_starts(&self) -> usize {
        *self.overlapping_starts.lock().unwrap()
    }
}

impl CycleBackend for FakeBackend {
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>> {
        self.journal.push(Step::Build);
        let success = self.outcomes.lock().unwrap().pop_front().unwrap_or(true);
        Box::pin(async move {
            let elapsed = Duration::from_millis(1);
            if success {
                BuildOutcome::succeeded(elapsed)
            } else {
                BuildOutcome::failed(elapsed, BuildFailure::ExitStatus(Some(2)))
            }
        })
    }

    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.journal.push(Step::Stop);
        *self.live.lock().unwrap() = false;
        Box::pin(async {})
    }

    fn start(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        self.journal.push(Step::Start);
        let result = if self.fail_start {
            Err(DevError::ProcessStart {
                program: PathBuf::from("bin/raptorapp"),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            })
        } else {
            let mut live = self.live.lock().unwrap();
            if *live {
                *self.overlapping_starts.lock().unwrap() += 1;
            }
            *live = true;
            Ok(())
        };
        Box::pin(async move { result })
    }
}
