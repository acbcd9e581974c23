use serde::Deserialize;
use thiserror::Error;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Hex characters in a SHA-256 digest; no target beyond this can be met
pub const MAX_DIFFICULTY: usize = 64;

/// How many attempts pass between wall-clock checks
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Reasons a proof-of-work search stops without a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    #[error("Mining cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    #[error("Mining gave up after reaching the limit of {attempts} attempts")]
    AttemptLimitReached { attempts: u64 },

    #[error("Mining timed out after {elapsed:?} ({attempts} attempts)")]
    TimedOut { elapsed: Duration, attempts: u64 },
}

/// Upper bounds on a single proof-of-work search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MiningLimits {
    #[serde(default)]
    pub max_attempts: Option<u64>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl MiningLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Shared flag used to stop a running search from another thread
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Hash attempts made so far, readable while the search runs
#[derive(Debug, Clone, Default)]
pub struct MiningProgress(Arc<AtomicU64>);

impl MiningProgress {
    pub fn attempts(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn record(&self, attempts: u64) {
        self.0.store(attempts, Ordering::Relaxed);
    }
}

/// Everything a proof-of-work search consults besides the block itself
#[derive(Debug, Clone, Default)]
pub struct MiningControl {
    pub token: CancellationToken,
    pub progress: MiningProgress,
    pub limits: MiningLimits,
}

impl MiningControl {
    pub fn new(limits: MiningLimits) -> Self {
        MiningControl {
            limits,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Starts the bookkeeping for one search
    pub(crate) fn start(&self) -> MiningRun<'_> {
        self.progress.record(0);
        MiningRun {
            control: self,
            started: Instant::now(),
            deadline: self.limits.timeout(),
            attempts: 0,
        }
    }
}

/// Per-search state: attempt count and elapsed time against the limits
pub(crate) struct MiningRun<'a> {
    control: &'a MiningControl,
    started: Instant,
    deadline: Option<Duration>,
    attempts: u64,
}

impl MiningRun<'_> {
    /// Counts one hash attempt and decides whether the search may continue
    pub(crate) fn attempt(&mut self) -> Result<(), MiningError> {
        self.attempts += 1;
        let attempts = self.attempts;

        if self.control.token.is_cancelled() {
            self.control.progress.record(attempts);
            return Err(MiningError::Cancelled { attempts });
        }

        if let Some(max) = self.control.limits.max_attempts {
            if attempts > max {
                self.control.progress.record(attempts);
                return Err(MiningError::AttemptLimitReached { attempts: max });
            }
        }

        if attempts % CLOCK_CHECK_INTERVAL == 0 {
            self.control.progress.record(attempts);

            if let Some(deadline) = self.deadline {
                let elapsed = self.started.elapsed();
                if elapsed >= deadline {
                    return Err(MiningError::TimedOut { elapsed, attempts });
                }
            }
        }

        Ok(())
    }

    pub(crate) fn finish(&self) -> u64 {
        self.control.progress.record(self.attempts);
        self.attempts
    }
}

/// Whether a hex digest starts with `difficulty` zero characters
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}
