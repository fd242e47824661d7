use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}
impl CalendarEvent {
    pub fn occurs_on_day(&self, day: &NaiveDate) -> bool {
        let day_start = day.and_time(chrono::NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        if self.start == self.end {
            return self.start >= day_start && self.start < day_end;
        }
        self.start < day_end && self.end > day_start
    }
}

/// Events touching more days than this are not indexed per day.
const MAX_INDEXED_DAYS: i64 = 31;

/// All events, indexed by the days they touch.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    by_day: BTreeMap<NaiveDate, Vec<usize>>,
    /// Long events, matched against a day by range.
    spanning: Vec<usize>,
}
impl EventStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        let mut spanning = Vec::new();
        for (index, event) in events.iter().enumerate() {
            if event.end < event.start {
                log::warn!("Skipping event `{}`: it ends before it starts", event.title);
                continue;
            }
            if (event.end.date() - event.start.date()).num_days() > MAX_INDEXED_DAYS {
                spanning.push(index);
                continue;
            }
            let mut day = event.start.date();
            while event.occurs_on_day(&day) {
                by_day.entry(day).or_default().push(index);
                let Some(next) = day.succ_opt() else {
                    break;
                };
                day = next;
            }
        }
        Self {
            events,
            by_day,
            spanning,
        }
    }
    pub fn from_json_str(s: &str) -> Result<Self, SwipecalError> {
        serde_json::from_str::<Vec<CalendarEvent>>(s)
            .map(Self::new)
            .map_err(|e| swipecal_err!(SwipecalErrorKind::Deserialize, e.to_string()))
    }
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SwipecalError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            swipecal_err!(
                SwipecalErrorKind::FileOpen,
                "{}: {}",
                path.display(),
                e
            )
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Vec<CalendarEvent>>(reader)
            .map(Self::new)
            .map_err(|e| swipecal_err!(SwipecalErrorKind::Deserialize, e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&CalendarEvent> {
        self.events.get(index)
    }
    /// Events touching `day` as `(index, event)`, ordered by start.
    pub fn on_day(&self, day: NaiveDate) -> Vec<(usize, &CalendarEvent)> {
        let mut found: Vec<_> = self
            .by_day
            .get(&day)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.events.get(i).map(|e| (i, e)))
            .chain(self.spanning.iter().filter_map(|&i| {
                self.events
                    .get(i)
                    .filter(|e| e.occurs_on_day(&day))
                    .map(|e| (i, e))
            }))
            .collect();
        found.sort_by_key(|(_, e)| e.start);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent {
            id: None,
            title: title.into(),
            start,
            end,
            color: None,
            location: None,
        }
    }

    #[test]
    fn groups_events_by_day() {
        let store = EventStore::new(vec![
            event("standup", at(3, 9, 0), at(3, 9, 15)),
            event("early", at(3, 7, 0), at(3, 8, 0)),
            event("lunch", at(4, 12, 0), at(4, 13, 0)),
        ]);
        let day3 = store.on_day(at(3, 0, 0).date());
        assert_eq!(
            day3.iter().map(|(_, e)| e.title.as_str()).collect::<Vec<_>>(),
            vec!["early", "standup"]
        );
        assert_eq!(store.on_day(at(4, 0, 0).date()).len(), 1);
        assert!(store.on_day(at(5, 0, 0).date()).is_empty());
    }

    #[test]
    fn overnight_events_touch_both_days() {
        let store = EventStore::new(vec![event("night shift", at(3, 22, 0), at(4, 6, 0))]);
        assert_eq!(store.on_day(at(3, 0, 0).date()).len(), 1);
        assert_eq!(store.on_day(at(4, 0, 0).date()).len(), 1);
        // Ending exactly at midnight does not spill into the next day.
        let store = EventStore::new(vec![event("late", at(3, 23, 0), at(4, 0, 0))]);
        assert!(store.on_day(at(4, 0, 0).date()).is_empty());
    }

    #[test]
    fn skips_inverted_events() {
        let store = EventStore::new(vec![event("broken", at(3, 10, 0), at(3, 9, 0))]);
        assert_eq!(store.len(), 1);
        assert!(store.on_day(at(3, 0, 0).date()).is_empty());
    }

    #[test]
    fn long_events_are_matched_by_range() {
        let forever = event(
            "forever",
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        );
        let store = EventStore::new(vec![forever, event("standup", at(3, 9, 0), at(3, 9, 15))]);
        assert_eq!(store.spanning, vec![0]);
        assert_eq!(store.by_day.len(), 1);

        let day3 = store.on_day(at(3, 0, 0).date());
        assert_eq!(
            day3.iter().map(|(_, e)| e.title.as_str()).collect::<Vec<_>>(),
            vec!["forever", "standup"]
        );
        assert_eq!(store.on_day(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()).len(), 1);
        assert!(store.on_day(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()).is_empty());
    }

    #[test]
    fn parses_json_events() {
        let store = EventStore::from_json_str(
            r##"[{"title": "Review", "start": "2024-06-03T10:00:00", "end": "2024-06-03T11:30:00", "color": "#4D99E6"}]"##,
        )
        .unwrap();
        let (index, review) = store.on_day(at(3, 0, 0).date())[0];
        assert_eq!(index, 0);
        assert_eq!(review.color.as_deref(), Some("#4D99E6"));
        assert_eq!(review.location, None);

        let err = EventStore::from_json_str("{").unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::Deserialize);
    }
}
