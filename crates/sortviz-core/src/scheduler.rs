//! Tick scheduling for the playback engine.
//!
//! The engine only talks to [`TickScheduler`]; the event loop drives a
//! [`DeadlineScheduler`] by calling [`DeadlineScheduler::advance`] with the
//! current time and forwarding the due timers back to the engine.

use std::time::{Duration, Instant};

/// Handle of a repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Create a handle from a raw id. Schedulers own the numbering.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Source of repeating ticks.
pub trait TickScheduler {
    /// Arm a timer that fires every `interval` until cancelled.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Disarm a timer. Unknown ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct ArmedTimer {
    id: TimerId,
    interval: Duration,
    deadline: Instant,
}

/// Deadline-based scheduler polled by a cooperative event loop.
#[derive(Debug)]
pub struct DeadlineScheduler {
    now: Instant,
    next_id: u64,
    timers: Vec<ArmedTimer>,
}

impl DeadlineScheduler {
    /// Create a scheduler whose clock starts at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Move the clock to `now` and return the timers that are due.
    ///
    /// Each timer fires at most once per call. A timer that fell more than
    /// one interval behind is re-anchored on `now` instead of catching up.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerId> {
        if now > self.now {
            self.now = now;
        }
        let mut due = Vec::new();
        for timer in &mut self.timers {
            if timer.deadline <= self.now {
                due.push(timer.id);
                let next = timer.deadline + timer.interval;
                timer.deadline = if next <= self.now {
                    self.now + timer.interval
                } else {
                    next
                };
            }
        }
        due
    }

    /// Time until the earliest armed timer is due, `None` when idle.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.deadline.saturating_duration_since(self.now))
            .min()
    }

    #[must_use]
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Interval of an armed timer.
    #[must_use]
    pub fn interval_of(&self, id: TimerId) -> Option<Duration> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.interval)
    }
}

impl TickScheduler for DeadlineScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(ArmedTimer {
            id,
            interval,
            deadline: self.now + interval,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
