use chrono::NaiveDateTime;

use crate::calendar::days::NumberOfDays;

pub const PAGE_COUNT: usize = 5;
pub const CENTER_PAGE: usize = 2;

/// Five page pivots, earliest first, with the selected date in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pages: [NaiveDateTime; PAGE_COUNT],
}
impl DateWindow {
    pub fn pivot(&self) -> NaiveDateTime {
        self.pages[CENTER_PAGE]
    }
    pub fn iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.pages.iter().copied()
    }
}

pub fn prepare_dates(current_moment: NaiveDateTime, number_of_days: NumberOfDays) -> DateWindow {
    let mut pages = [current_moment; PAGE_COUNT];
    for (slot, offset) in pages.iter_mut().zip(-2_i64..=2) {
        *slot = current_moment + number_of_days.span(offset);
    }
    DateWindow { pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn pivot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 28)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    #[test]
    fn window_is_symmetric_for_every_day_count() {
        for days in [NumberOfDays::Three, NumberOfDays::Five, NumberOfDays::Seven] {
            let n = days.get() as i64;
            let window = prepare_dates(pivot(), days);
            let expected: Vec<_> = [-2, -1, 0, 1, 2]
                .iter()
                .map(|k| pivot() + Duration::days(k * n))
                .collect();
            assert_eq!(window.iter().collect::<Vec<_>>(), expected);
            assert_eq!(window.pivot(), pivot());
        }
    }

    #[test]
    fn crosses_leap_day_and_keeps_time_of_day() {
        let window = prepare_dates(pivot(), NumberOfDays::Three);
        assert_eq!(
            window.iter().nth(3),
            NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(9, 15, 0)
        );
        assert_eq!(window.iter().count(), PAGE_COUNT);
    }
}
