use chrono::{
    Duration, NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};

use crate::{
    calendar::days::NumberOfDays,
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

pub const DEFAULT_HEADER_FORMAT: &str = "%a %-d";

/// A validated strftime string for the day labels above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormat(String);
impl HeaderFormat {
    pub fn parse(format: &str) -> Result<Self, SwipecalError> {
        if format.trim().is_empty() {
            return Err(swipecal_err!(
                SwipecalErrorKind::InvalidAttribute,
                "format_date_header must not be empty"
            ));
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(swipecal_err!(
                SwipecalErrorKind::InvalidAttribute,
                "format_date_header `{}` is not a valid strftime format",
                format
            ));
        }
        Ok(Self(format.to_string()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.0).to_string()
    }
}
impl Default for HeaderFormat {
    fn default() -> Self {
        Self(DEFAULT_HEADER_FORMAT.to_string())
    }
}

/// The days shown on the page starting at `selected_date`.
pub fn header_days(selected_date: NaiveDateTime, number_of_days: NumberOfDays) -> Vec<NaiveDate> {
    let first = selected_date.date();
    (0..number_of_days.get() as i64)
        .map(|i| first + Duration::days(i))
        .collect()
}

pub fn header_labels(
    selected_date: NaiveDateTime,
    number_of_days: NumberOfDays,
    format: &HeaderFormat,
) -> Vec<String> {
    header_days(selected_date, number_of_days)
        .into_iter()
        .map(|day| format.format(day))
        .collect()
}
