//! Source of the current calendar date.
//!
//! Rental dates are civil dates, so the clock only answers "what day is
//! it". Tests pin the day with [`FixedClock`].

use std::sync::{Arc, RwLock};

use jiff::civil::Date;
use jiff::{Zoned, ToSpan};

pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Reads the date in the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// A clock stuck on a given day until moved.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Arc<RwLock<Date>>,
}

impl FixedClock {
    pub fn new(today: Date) -> Self {
        Self {
            today: Arc::new(RwLock::new(today)),
        }
    }

    pub fn set(&self, today: Date) {
        if let Ok(mut guard) = self.today.write() {
            *guard = today;
        }
    }

    /// Moves the clock forward by `days`.
    pub fn advance_days(&self, days: i32) {
        if let Ok(mut guard) = self.today.write() {
            if let Ok(next) = guard.checked_add(days.days()) {
                *guard = next;
            }
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let clock = FixedClock::new(date(2024, 2, 28));
        assert_eq!(clock.today(), date(2024, 2, 28));
    }

    #[test]
    fn test_fixed_clock_advance_crosses_leap_day() {
        let clock = FixedClock::new(date(2024, 2, 28));
        clock.advance_days(2);
        assert_eq!(clock.today(), date(2024, 3, 1));
    }

    #[test]
    fn test_fixed_clock_clones_share_state() {
        let clock = FixedClock::new(date(2024, 1, 1));
        let shared = clock.clone();
        clock.set(date(2024, 6, 1));
        assert_eq!(shared.today(), date(2024, 6, 1));
    }
}
