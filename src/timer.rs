use std::time::{Duration, Instant};

/// Cancellable periodic tick schedule.
///
/// Changing the period is always `cancel` followed by `arm`, so at most one
/// schedule is ever live and a new period applies from the very next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickTimer {
    period: Option<Duration>,
    deadline: Option<Instant>,
}

impl TickTimer {
    /// Creates a timer with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh schedule firing every `period`, first at `now + period`.
    pub fn arm(&mut self, period: Duration, now: Instant) {
        self.cancel();
        self.period = Some(period);
        self.deadline = Some(now + period);
    }

    /// Drops the live schedule, if any.
    pub fn cancel(&mut self) {
        self.period = None;
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Time left until the next firing; zero when overdue.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true and schedules the next firing when the deadline passed.
    ///
    /// Overdue firings are collapsed into one; the next deadline is measured
    /// from `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        let (Some(period), Some(deadline)) = (self.period, self.deadline) else {
            return false;
        };

        if now < deadline {
            return false;
        }

        self.deadline = Some(now + period);
        true
    }
}
