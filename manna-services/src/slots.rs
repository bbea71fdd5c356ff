//! Time-slot generator: random future delivery timestamps.
//!
//! Policy: bounded daily window. Each slot is an independent uniform sample
//! of minute-of-day within `[start_hour:00, end_hour:00)`, placed on the
//! current date; a slot not strictly after `now` rolls to the same clock
//! time on the next day. Slots are returned sorted ascending. Duplicates are
//! allowed and no minimum spacing is enforced.

use chrono::{DateTime, Duration, TimeZone, Timelike};
use rand::Rng;

use manna_core::error::{MannaError, MannaResult};

/// Daily delivery window in whole local hours, start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    start_hour: u32,
    end_hour: u32,
}

impl DeliveryWindow {
    /// Build a window, rejecting empty, inverted, or out-of-range hours.
    pub fn new(start_hour: u32, end_hour: u32) -> MannaResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(MannaError::InvalidConfig(format!(
                "delivery window {start_hour}..{end_hour} is empty or out of range"
            )));
        }
        Ok(Self { start_hour, end_hour })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }
}

impl Default for DeliveryWindow {
    fn default() -> Self {
        Self {
            start_hour: manna_core::constants::DEFAULT_WINDOW_START_HOUR,
            end_hour: manna_core::constants::DEFAULT_WINDOW_END_HOUR,
        }
    }
}

/// Generate `count` future timestamps within the delivery window.
///
/// The sequence is sorted ascending and every timestamp is strictly after
/// `now`. `count = 0` yields an empty sequence.
pub fn generate_slots<Tz, R>(
    count: u32,
    window: DeliveryWindow,
    now: DateTime<Tz>,
    rng: &mut R,
) -> Vec<DateTime<Tz>>
where
    Tz: TimeZone,
    R: Rng,
{
    // Midnight of the current day, derived by subtraction so the arithmetic
    // stays in the caller's timezone. The offsets below are absolute-time
    // durations, so on a DST transition day a slot can land up to an hour
    // outside the configured wall-clock window.
    let since_midnight = Duration::seconds(i64::from(now.time().num_seconds_from_midnight()))
        + Duration::nanoseconds(i64::from(now.time().nanosecond()));
    let midnight = now.clone() - since_midnight;

    let start_minute = window.start_hour * 60;
    let end_minute = window.end_hour * 60;

    let mut slots: Vec<DateTime<Tz>> = (0..count)
        .map(|_| {
            let minute = rng.gen_range(start_minute..end_minute);
            let mut at = midnight.clone() + Duration::minutes(i64::from(minute));
            if at <= now {
                at = at + Duration::days(1);
            }
            at
        })
        .collect();

    slots.sort();
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_count_is_empty() {
        let slots = generate_slots(0, DeliveryWindow::default(), noon(), &mut rng());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_count_sorted_and_future() {
        let now = noon();
        let slots = generate_slots(20, DeliveryWindow::default(), now, &mut rng());
        assert_eq!(slots.len(), 20);
        for pair in slots.windows(2) {
            assert!(pair[0] <= pair[1], "slots must be non-decreasing");
        }
        for slot in &slots {
            assert!(*slot > now, "every slot must be strictly after now");
        }
    }

    #[test]
    fn test_slots_fall_within_window_hours() {
        let now = noon();
        let window = DeliveryWindow::new(8, 21).unwrap();
        let slots = generate_slots(100, window, now, &mut rng());
        for slot in &slots {
            let hour = slot.hour();
            assert!((8..21).contains(&hour), "slot hour {hour} outside window");
            assert_eq!(slot.second(), 0);
        }
    }

    #[test]
    fn test_past_minutes_roll_to_next_day() {
        // Now is one minute before the window closes: almost every draw is
        // in the past and must roll forward by exactly one day.
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 20, 59, 0).unwrap();
        let window = DeliveryWindow::new(8, 21).unwrap();
        let slots = generate_slots(50, window, now, &mut rng());
        for slot in &slots {
            assert!(*slot > now);
            assert!(*slot <= now + Duration::days(1));
        }
    }

    #[test]
    fn test_before_window_opens_slots_are_same_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap();
        let window = DeliveryWindow::new(8, 21).unwrap();
        let slots = generate_slots(50, window, now, &mut rng());
        for slot in &slots {
            assert_eq!(slot.date_naive(), now.date_naive());
        }
    }

    #[test]
    fn test_window_validation() {
        assert!(DeliveryWindow::new(8, 21).is_ok());
        assert!(DeliveryWindow::new(21, 8).is_err());
        assert!(DeliveryWindow::new(8, 8).is_err());
        assert!(DeliveryWindow::new(8, 25).is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let now = noon();
        let a = generate_slots(5, DeliveryWindow::default(), now, &mut StdRng::seed_from_u64(3));
        let b = generate_slots(5, DeliveryWindow::default(), now, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
