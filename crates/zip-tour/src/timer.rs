#![forbid(unsafe_code)]

//! One-shot cancellable delays.
//!
//! A [`Delay`] is owned by the component that armed it and only advances
//! when that component calls [`Delay::tick`]. Dropping the owner drops the
//! delay, so nothing fires after teardown.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use zip_tour::timer::Delay;
//!
//! let mut delay = Delay::new(Duration::from_millis(300));
//! delay.arm();
//! assert!(!delay.tick(Duration::from_millis(200)));
//! assert!(delay.tick(Duration::from_millis(100)));
//! assert!(!delay.is_pending());
//! ```

use std::time::Duration;

/// A one-shot countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delay {
    duration: Duration,
    remaining: Option<Duration>,
}

impl Delay {
    /// Creates a disarmed delay of the given length.
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: None,
        }
    }

    /// Starts (or restarts) the countdown from the full duration.
    pub fn arm(&mut self) {
        self.remaining = Some(self.duration);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time left before firing, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advances the countdown. Returns `true` exactly once, on the tick
    /// that reaches zero; the delay is disarmed afterwards.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining.saturating_sub(delta);
        if left.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}
