//! Tick cadence and the pausable replay clock.
//!
//! The UI event loop calls [`TickClock::poll`] every frame; at most one tick is
//! due per poll. A late frame simply delays the next tick, there is no
//! catch-up and no drift correction.

use std::time::{Duration, Instant};

/// Default render-tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    last: Option<Instant>,
    fired: u64,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: None,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns `true` if a tick is due at `now` and records it as fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.period,
        };
        if due {
            self.last = Some(now);
            self.fired += 1;
        }
        due
    }

    /// Time left until the next tick becomes due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => self
                .period
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// Wall-clock time since replay start, excluding paused intervals.
#[derive(Debug, Clone)]
pub struct ReplayClock {
    started: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl ReplayClock {
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(at);
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.started)
            .saturating_sub(self.paused_total)
    }
}
