use log::{debug, info, warn};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How a readiness poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The predicate held on attempt `attempts`
    Ready { attempts: u32 },
    /// The attempt limit was reached without the predicate holding
    Exhausted { attempts: u32 },
    /// The handle was cancelled before the predicate held
    Cancelled { attempts: u32 },
}

impl PollOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }

    pub fn attempts(&self) -> u32 {
        match *self {
            PollOutcome::Ready { attempts }
            | PollOutcome::Exhausted { attempts }
            | PollOutcome::Cancelled { attempts } => attempts,
        }
    }
}

/// Re-checks a readiness predicate at a fixed interval
///
/// The first check runs immediately. Between checks the poll sleeps for
/// `interval`; cancellation wakes it early.
pub struct ReadinessPoll<P> {
    interval: Duration,
    max_attempts: Option<u32>,
    predicate: P,
}

impl<P: FnMut() -> bool> ReadinessPoll<P> {
    /// Unbounded poll; see `max_attempts`
    pub fn new(interval: Duration, predicate: P) -> Self {
        Self {
            interval,
            max_attempts: None,
            predicate,
        }
    }

    /// Stop after this many failed checks (`None` for no limit)
    pub fn max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Poll on the calling thread until ready or out of attempts
    pub fn wait(self) -> PollOutcome {
        self.run(&AtomicBool::new(false))
    }

    fn run(mut self, cancel: &AtomicBool) -> PollOutcome {
        let mut attempts = 0;

        loop {
            if cancel.load(Ordering::Relaxed) {
                debug!("poll: cancelled after {} attempts", attempts);
                return PollOutcome::Cancelled { attempts };
            }

            attempts += 1;
            if (self.predicate)() {
                info!("poll: ready after {} attempts", attempts);
                return PollOutcome::Ready { attempts };
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                warn!("poll: not ready after {} attempts, giving up", attempts);
                return PollOutcome::Exhausted { attempts };
            }

            debug!(
                "poll: not ready (attempt {}), retrying in {:?}",
                attempts, self.interval
            );
            sleep_unless_cancelled(self.interval, cancel);
        }
    }
}

impl<P: FnMut() -> bool + Send + 'static> ReadinessPoll<P> {
    /// Poll on a background thread
    pub fn spawn(self) -> io::Result<PollHandle> {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let thread = thread::Builder::new()
            .name("readiness-poll".to_string())
            .spawn(move || self.run(&flag))?;

        Ok(PollHandle { cancel, thread })
    }
}

/// Parks until `interval` has passed or the poll is cancelled
fn sleep_unless_cancelled(interval: Duration, cancel: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while !cancel.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::park_timeout(deadline - now);
    }
}

/// Owner's handle on a spawned poll
pub struct PollHandle {
    cancel: Arc<AtomicBool>,
    thread: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Ask the poll to stop; it returns `Cancelled` unless already finished
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.thread.thread().unpark();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the poll to end
    pub fn join(self) -> PollOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
