use core::time::Duration;
use web_time::Instant;

/// Wall-clock time spent on a game. Starting a running clock or stopping a stopped one does
/// nothing, so it can follow the engine's start/end notifications blindly.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GameClock {
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Begins a new run, unless one is already in progress.
    pub fn start_at(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.started_at = Some(now);
        self.ended_at = None;
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub fn stop_at(&mut self, now: Instant) {
        if self.is_running() {
            self.ended_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Time since the clock started, frozen once stopped, zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clock_reports_zero() {
        let clock = GameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn repeated_start_keeps_original_start() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();

        clock.start_at(t0);
        clock.start_at(t0 + Duration::from_secs(5));

        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(7)), Duration::from_secs(7));
    }

    #[test]
    fn stop_freezes_elapsed_time_and_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();

        clock.start_at(t0);
        clock.stop_at(t0 + Duration::from_secs(3));
        clock.stop_at(t0 + Duration::from_secs(9));

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(60)), Duration::from_secs(3));
    }

    #[test]
    fn restart_after_stop_begins_a_new_run() {
        let t0 = Instant::now();
        let mut clock = GameClock::new();

        clock.start_at(t0);
        clock.stop_at(t0 + Duration::from_secs(3));
        clock.start_at(t0 + Duration::from_secs(10));

        assert!(clock.is_running());
        assert_eq!(clock.elapsed_at(t0 + Duration::from_secs(12)), Duration::from_secs(2));

        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
