//! Fixed-cadence frame pacing.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away the remainder of each frame period.
///
/// A frame that overruns its deadline does not make later frames shorter:
/// the schedule restarts from the late frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Option<Duration>,
    deadline: Instant,
}

impl FrameClock {
    /// A clock ticking `frame_rate` times per second; zero disables pacing.
    #[must_use]
    pub fn new(frame_rate: u32) -> Self {
        let period = (frame_rate > 0).then(|| Duration::from_secs(1) / frame_rate);
        Self { period, deadline: Instant::now() }
    }

    /// A clock that never sleeps.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self { period: None, deadline: Instant::now() }
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Block until the current frame's period has elapsed.
    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let now = Instant::now();
        self.deadline += period;
        if self.deadline > now {
            thread::sleep(self.deadline - now);
        } else {
            self.deadline = now;
        }
    }
}
