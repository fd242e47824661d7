use chrono::{NaiveDate, NaiveDateTime};

use crate::{swipecal_err, utils::errors::SwipecalError, utils::errors::SwipecalErrorKind};

pub mod errors;
pub mod paths;

/// Parses either a full `YYYY-MM-DDTHH:MM[:SS]` date-time or a plain `YYYY-MM-DD`
/// date, which is taken at midnight.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, SwipecalError> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| {
            swipecal_err!(
                SwipecalErrorKind::DateParse,
                "Cannot parse `{}` as a date: {}",
                s,
                e
            )
        })
}
