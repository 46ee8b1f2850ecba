//! Scripted actions that fail a fixed number of times before succeeding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptError {
    pub attempt: usize,
}

/// Counts calls and fails the first `failures` of them.
#[derive(Clone)]
pub struct Flaky {
    failures: usize,
    calls: Arc<AtomicUsize>,
}

impl Flaky {
    pub fn new(failures: usize) -> Self {
        Flaky {
            failures,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn attempt(&self) -> Result<(), AttemptError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            Err(AttemptError { attempt })
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
