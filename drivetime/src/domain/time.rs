//! Survey timestamps.
//!
//! Every recorded row carries the date, weekday, wall-clock time and a
//! half-hour bucket, so rows taken a few minutes apart on different days
//! can be grouped together.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// The time fields recorded alongside a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// ISO date, e.g. `2024-01-01`.
    pub date: String,
    /// Full weekday name, e.g. `Monday`.
    pub weekday: String,
    /// 12-hour clock time, e.g. `03:48 PM`.
    pub clock_time: String,
    /// Nearest half hour, e.g. `4:00 PM`.
    pub half_hour: String,
}

impl Timestamp {
    /// Build the recorded fields for a local date and time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use drivetime::domain::Timestamp;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 1, 1)
    ///     .unwrap()
    ///     .and_hms_opt(15, 48, 0)
    ///     .unwrap();
    /// let ts = Timestamp::from_local(at);
    /// assert_eq!(ts.date, "2024-01-01");
    /// assert_eq!(ts.weekday, "Monday");
    /// assert_eq!(ts.clock_time, "03:48 PM");
    /// assert_eq!(ts.half_hour, "4:00 PM");
    /// ```
    pub fn from_local(at: NaiveDateTime) -> Self {
        Self {
            date: at.date().format("%Y-%m-%d").to_string(),
            weekday: at.format("%A").to_string(),
            clock_time: at.format("%I:%M %p").to_string(),
            half_hour: half_hour_bucket(at.time()).format("%-I:%M %p").to_string(),
        }
    }
}

/// Round a time of day to its half-hour bucket.
///
/// Minutes below 15 round down to `:00`, 15 to 44 go to `:30`, and 45 or
/// more go to the next hour's `:00`. The bucket wraps past midnight.
pub fn half_hour_bucket(time: NaiveTime) -> NaiveTime {
    let hour = time.hour();
    let (hour, minute) = match time.minute() {
        0..15 => (hour, 0),
        15..45 => (hour, 30),
        _ => ((hour + 1) % 24, 0),
    };
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Source of the current time.
///
/// Abstracted so that rows written in tests have predictable timestamps.
pub trait ClockSource {
    fn now(&self) -> Timestamp;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_local(Local::now().naive_local())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Convenience constructor from date and time components.
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        date.and_hms_opt(hour, minute, 0).map(Self)
    }

    /// The same clock moved forward by `minutes`.
    pub fn advanced(self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_local(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn bucket_rounds_down_before_quarter_past() {
        assert_eq!(half_hour_bucket(hm(9, 0)), hm(9, 0));
        assert_eq!(half_hour_bucket(hm(9, 14)), hm(9, 0));
    }

    #[test]
    fn bucket_snaps_to_half_past() {
        assert_eq!(half_hour_bucket(hm(9, 15)), hm(9, 30));
        assert_eq!(half_hour_bucket(hm(9, 44)), hm(9, 30));
    }

    #[test]
    fn bucket_rounds_up_to_next_hour() {
        assert_eq!(half_hour_bucket(hm(9, 45)), hm(10, 0));
        assert_eq!(half_hour_bucket(hm(11, 59)), hm(12, 0));
    }

    #[test]
    fn bucket_wraps_past_midnight() {
        assert_eq!(half_hour_bucket(hm(23, 50)), hm(0, 0));
    }

    #[test]
    fn timestamp_fields() {
        let clock = FixedClock::at(date(), 12, 20).unwrap();
        let ts = clock.now();

        assert_eq!(ts.date, "2024-03-15");
        assert_eq!(ts.weekday, "Friday");
        assert_eq!(ts.clock_time, "12:20 PM");
        assert_eq!(ts.half_hour, "12:30 PM");
    }

    #[test]
    fn late_evening_bucket_is_midnight_am() {
        let clock = FixedClock::at(date(), 23, 47).unwrap();
        let ts = clock.now();

        assert_eq!(ts.clock_time, "11:47 PM");
        assert_eq!(ts.half_hour, "12:00 AM");
    }

    #[test]
    fn advanced_clock_moves_forward() {
        let clock = FixedClock::at(date(), 8, 50).unwrap().advanced(20);
        assert_eq!(clock.now().clock_time, "09:10 AM");
    }
}
