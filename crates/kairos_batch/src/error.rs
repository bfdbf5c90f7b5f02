//! Error types for batch computation.

use chrono::NaiveDate;
use kairos_search::SearchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BatchError {
    /// Inclusive span from earliest to latest date exceeds the cap.
    #[error("date range spans {requested_days} days, maximum is {max_days}")]
    RangeTooLarge { requested_days: i64, max_days: u32 },
    /// Timezone is not a known IANA name.
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
    /// No valid local time near noon on this date.
    #[error("no valid local time near noon on {0}")]
    UnresolvableLocalTime(NaiveDate),
    #[error("invalid batch config: {0}")]
    InvalidConfig(&'static str),
    /// A single date failed to summarize.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}
