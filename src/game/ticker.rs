use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Schedules the moves of the snake at a fixed rate.  The ticker only decides
/// *when* a move is due; the game decides what a move does.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker {
            period,
            next_tick: None,
        }
    }

    /// Create a ticker that fires `fps` times a second
    pub(crate) fn per_second(fps: NonZeroU32) -> Ticker {
        Ticker::new(Duration::from_secs(1) / fps.get())
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// Return how long to wait from `now` before the next tick, arming the
    /// ticker if it is not already armed
    pub(crate) fn wait(&mut self, now: Instant) -> Duration {
        let when = *self.next_tick.get_or_insert(now + self.period);
        when.saturating_duration_since(now)
    }

    /// Record that a tick has been run.  The next tick will be scheduled one
    /// period after the next call to [`Ticker::wait()`].
    pub(crate) fn fired(&mut self) {
        self.next_tick = None;
    }

    /// Forget any scheduled tick, as when the game is paused
    pub(crate) fn disarm(&mut self) {
        self.next_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_second() {
        let ticker = Ticker::per_second(NonZeroU32::new(20).unwrap());
        assert_eq!(ticker.period(), Duration::from_millis(50));
    }

    #[test]
    fn wait_counts_down() {
        let mut ticker = Ticker::new(Duration::from_millis(200));
        let start = Instant::now();
        assert_eq!(ticker.wait(start), Duration::from_millis(200));
        assert_eq!(
            ticker.wait(start + Duration::from_millis(150)),
            Duration::from_millis(50)
        );
        assert_eq!(ticker.wait(start + Duration::from_millis(250)), Duration::ZERO);
    }

    #[test]
    fn fired_rearms_from_next_wait() {
        let mut ticker = Ticker::new(Duration::from_millis(200));
        let start = Instant::now();
        let _ = ticker.wait(start);
        ticker.fired();
        let later = start + Duration::from_millis(300);
        assert_eq!(ticker.wait(later), Duration::from_millis(200));
    }

    #[test]
    fn disarm() {
        let mut ticker = Ticker::new(Duration::from_millis(200));
        let start = Instant::now();
        let _ = ticker.wait(start);
        ticker.disarm();
        assert_eq!(
            ticker.wait(start + Duration::from_secs(5)),
            Duration::from_millis(200)
        );
    }
}
