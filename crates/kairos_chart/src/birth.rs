//! Civil birth data resolved through an IANA timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use kairos_core::Engine;
use kairos_time::{calendar_to_jd, datetime_from_jd};
use serde::{Deserialize, Serialize};

use crate::chart::{NatalChart, compute_chart};
use crate::error::ChartError;
use crate::location::GeoLocation;

/// Birth date, optional clock time, timezone and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    /// Local clock time. `None` when unknown.
    pub time: Option<NaiveTime>,
    pub timezone: Tz,
    pub location: GeoLocation,
}

impl BirthData {
    pub fn has_exact_time(&self) -> bool {
        self.time.is_some()
    }

    /// UTC instant of birth.
    ///
    /// An ambiguous local time (clocks falling back) resolves to the earlier
    /// instant; a skipped local time is rejected. Without a clock time, the
    /// instant is local mean noon of the birth date at the birth longitude.
    pub fn birth_instant(&self) -> Result<DateTime<Utc>, ChartError> {
        self.location.validate()?;
        match self.time {
            Some(time) => self
                .timezone
                .from_local_datetime(&self.date.and_time(time))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or(ChartError::InvalidBirthTime(
                    "local time does not exist in the given timezone",
                )),
            None => {
                let midnight = calendar_to_jd(
                    self.date.year(),
                    self.date.month(),
                    self.date.day() as f64,
                );
                let noon = midnight + 0.5 - self.location.longitude_deg / 360.0;
                Ok(datetime_from_jd(noon)?)
            }
        }
    }

    pub fn compute_chart(&self, engine: &Engine) -> Result<NatalChart, ChartError> {
        let instant = self.birth_instant()?;
        compute_chart(engine, &instant, &self.location, self.has_exact_time())
    }
}
