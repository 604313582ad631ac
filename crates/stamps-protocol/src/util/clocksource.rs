use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::SeqCst;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ClockSource::{Mock, System};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A source of time.
#[derive(Debug, Clone)]
pub enum ClockSource {
    /// Clock source based on the system clock.
    System,

    /// Nanoseconds since the epoch, shared between clones. Only for testing.
    Mock(Arc<AtomicU64>),
}

impl ClockSource {
    /// A mock clock starting at `now` seconds since the epoch
    pub fn new_mock(now: u64) -> ClockSource {
        Mock(Arc::new(AtomicU64::new(now * NANOS_PER_SEC)))
    }

    /// Returns the number of non-leap nanoseconds since the start of 1970 UTC.
    pub fn epoch_nanos(&self) -> u64 {
        match self {
            System => match SystemTime::now().duration_since(UNIX_EPOCH) {
                Ok(n) => n.as_nanos() as u64,
                Err(e) => panic!("SystemTime before UNIX EPOCH! {e:?}"),
            },
            Mock(now) => now.load(SeqCst),
        }
    }

    /// Returns the number of non-leap seconds since the start of 1970 UTC.
    pub fn epoch_seconds(&self) -> u64 {
        self.epoch_nanos() / NANOS_PER_SEC
    }

    /// Sets the current time of this Mock clock, in seconds.
    pub fn set_time(&mut self, now: u64) {
        match self {
            System => unreachable!(),
            Mock(n) => n.store(now * NANOS_PER_SEC, SeqCst),
        }
    }

    /// Increases the current time of this Mock clock by the given duration.
    pub fn advance(&mut self, delta: Duration) {
        match self {
            System => unreachable!(),
            Mock(n) => {
                n.fetch_add(delta.as_nanos() as u64, SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now() {
        let timestamp = System.epoch_seconds();

        let clock = ClockSource::new_mock(timestamp);
        assert_eq!(clock.epoch_seconds(), timestamp);
        assert_eq!(clock.epoch_nanos(), timestamp * NANOS_PER_SEC);

        assert!(System.epoch_seconds() >= timestamp);
    }

    #[test]
    fn time_manipulation() {
        let mut clock = ClockSource::new_mock(1_000);
        clock.set_time(2_000);
        assert_eq!(clock.epoch_seconds(), 2_000);

        clock.advance(Duration::from_millis(1_500));
        assert_eq!(clock.epoch_seconds(), 2_001);
        assert_eq!(clock.epoch_nanos(), 2_001_500_000_000);
    }

    #[test]
    fn cloned_clocks_share_underlying_time() {
        let mut clock1 = ClockSource::new_mock(10);
        let clock2 = clock1.clone();

        clock1.set_time(20);
        assert_eq!(clock2.epoch_seconds(), 20);
    }
}
