use chrono::{DateTime, Utc};

/// Источник текущего времени для кэша
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Системное время (в браузере идёт через `Date.now()`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::Cell;

    /// Часы, которые двигаются только вручную
    pub struct ManualClock {
        now: Cell<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}
