use std::time::{Duration, Instant};

/// Tracks how long a game has been played, leaving out time spent paused
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct PlayClock {
    started: Option<Instant>,
    paused_total: Duration,
    paused_since: Option<Instant>,
    stopped: Option<Instant>,
}

impl PlayClock {
    pub(super) fn new() -> PlayClock {
        PlayClock::default()
    }

    pub(super) fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub(super) fn started(&self) -> bool {
        self.started.is_some()
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    pub(super) fn resume(&mut self, now: Instant) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += now.saturating_duration_since(since);
        }
    }

    /// Freeze the clock at `now`
    pub(super) fn stop(&mut self, now: Instant) {
        self.resume(now);
        if self.stopped.is_none() {
            self.stopped = Some(now);
        }
    }

    /// Return the play time as of `now`.  While paused or after stopping,
    /// the returned value does not change.
    pub(super) fn elapsed(&self, now: Instant) -> Duration {
        let Some(started) = self.started else {
            return Duration::ZERO;
        };
        let end = self.stopped.or(self.paused_since).unwrap_or(now);
        end.saturating_duration_since(started)
            .saturating_sub(self.paused_total)
    }
}
