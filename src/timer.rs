use std::time::{Duration, Instant};

/// How long an attempt may run before it is submitted automatically.
pub const TIMER_DURATION: Duration = Duration::from_secs(60);

/// Countdown derived from wall-clock time on every poll.
///
/// Nothing decrements it in the background; callers pass the current
/// instant and get back what is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    started_at: Option<Instant>,
    duration: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::with_duration(TIMER_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            started_at: None,
            duration,
        }
    }

    /// Start counting from `now`. Starting again overwrites the previous start.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started_at
            .map(|started_at| now.saturating_duration_since(started_at))
    }

    /// Time left at `now`, floored at zero. The full duration if never started.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.elapsed(now) {
            Some(elapsed) => self.duration.saturating_sub(elapsed),
            None => self.duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.has_started() && self.remaining(now).is_zero()
    }

    /// Remaining time in whole seconds for the countdown display.
    ///
    /// Rounds up, so the display only reads 0 once the timer has expired.
    pub fn remaining_whole_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }
}
