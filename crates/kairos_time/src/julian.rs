//! Julian Date conversions between calendar dates and `chrono` instants.
//!
//! Calendar ↔ JD uses the Gregorian algorithm from Meeus, "Astronomical
//! Algorithms" (2nd ed), Chapter 7. Instants map through the Unix epoch
//! (JD 2440587.5), which avoids calendar arithmetic entirely.

use chrono::{DateTime, Utc};

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date (UTC scale) of a `chrono` instant.
pub fn jd_from_datetime(instant: &DateTime<Utc>) -> f64 {
    let millis = instant.timestamp_millis() as f64;
    UNIX_EPOCH_JD + millis / (SECONDS_PER_DAY * 1000.0)
}

/// `chrono` instant of a Julian Date (UTC scale), rounded to the millisecond.
pub fn datetime_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFiniteJulianDate(jd));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(TimeError::Unrepresentable(jd));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::Unrepresentable(jd))
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Gregorian calendar date (with fractional day) to Julian Date.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day_frac + b - 1524.5
}

/// Julian Date to Gregorian `(year, month, day_frac)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Decimal Gregorian year of a Julian Date, e.g. `2024.5` mid-2024.
pub fn decimal_year(jd: f64) -> f64 {
    let (year, _, _) = jd_to_calendar(jd);
    let start = calendar_to_jd(year, 1, 1.0);
    let end = calendar_to_jd(year + 1, 1, 1.0);
    year as f64 + (jd - start) / (end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn j2000_calendar() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn meeus_example_7a() {
        // Meeus Example 7.a: 1957 Oct 4.81 = JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6, "jd = {jd}");
    }

    #[test]
    fn calendar_roundtrip() {
        let (y, m, d) = jd_to_calendar(2_460_390.25);
        let back = calendar_to_jd(y, m, d);
        assert!((back - 2_460_390.25).abs() < 1e-9);
    }

    #[test]
    fn unix_epoch() {
        let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!((jd_from_datetime(&t) - UNIX_EPOCH_JD).abs() < 1e-12);
    }

    #[test]
    fn datetime_matches_calendar() {
        let t = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let expected = calendar_to_jd(2024, 3, 20.5);
        assert!((jd_from_datetime(&t) - expected).abs() < 1e-9);
    }

    #[test]
    fn datetime_from_jd_millisecond_rounding() {
        let t = Utc.with_ymd_and_hms(2031, 7, 9, 18, 45, 30).unwrap();
        let back = datetime_from_jd(jd_from_datetime(&t)).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn datetime_from_nan_rejected() {
        assert!(matches!(
            datetime_from_jd(f64::NAN),
            Err(TimeError::NonFiniteJulianDate(_))
        ));
    }

    #[test]
    fn decimal_year_mid_year() {
        let jd = calendar_to_jd(2024, 7, 2.0);
        let y = decimal_year(jd);
        assert!((y - 2024.5).abs() < 0.01, "y = {y}");
    }
}
