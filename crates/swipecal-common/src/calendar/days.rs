use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

/// How many day columns one page shows. This is also the step of a single swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, strum::Display)]
#[serde(try_from = "u8", into = "u8")]
pub enum NumberOfDays {
    #[strum(to_string = "3")]
    Three,
    #[strum(to_string = "5")]
    Five,
    #[strum(to_string = "7")]
    Seven,
}
impl NumberOfDays {
    pub fn get(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Five => 5,
            Self::Seven => 7,
        }
    }
    /// The span covered by `pages` whole pages, negative pages go back in time.
    pub fn span(self, pages: i64) -> Duration {
        Duration::days(self.get() as i64 * pages)
    }
}
impl TryFrom<u8> for NumberOfDays {
    type Error = SwipecalError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            7 => Ok(Self::Seven),
            other => Err(swipecal_err!(
                SwipecalErrorKind::InvalidAttribute,
                "number_of_days must be one of 3, 5 or 7, got {}",
                other
            )),
        }
    }
}
impl From<NumberOfDays> for u8 {
    fn from(value: NumberOfDays) -> Self {
        value.get()
    }
}
