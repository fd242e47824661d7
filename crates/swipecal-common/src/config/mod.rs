use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{days::NumberOfDays, header::HeaderFormat, viewport::Viewport},
    swipecal_err,
    utils::{
        errors::{SwipecalError, SwipecalErrorKind},
        parse_date_time,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HeaderStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
}

/// The widget configuration as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwipeableSpec {
    pub number_of_days: u8,

    #[serde(default)]
    pub selected_date: Option<String>,

    #[serde(default)]
    pub events_file: Option<PathBuf>,

    #[serde(default = "default_header_format")]
    pub format_date_header: String,

    #[serde(default)]
    pub header_style: HeaderStyle,

    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_time_column_width")]
    pub time_column_width: f64,
    #[serde(default = "default_slot_height")]
    pub slot_height: f64,

    #[serde(default)]
    pub time_zone: Option<String>,

    #[serde(default = "default_accent")]
    pub accent_color: String,

    #[serde(default = "default_font")]
    pub font: String,
}

/// A configuration that passed validation.
#[derive(Debug, Clone)]
pub struct SwipeableConfig {
    pub number_of_days: NumberOfDays,
    pub selected_date: NaiveDateTime,
    pub format_date_header: HeaderFormat,
    pub header_style: HeaderStyle,
    pub viewport: Viewport,
    pub time_column_width: f64,
    pub slot_height: f64,
    pub time_zone: Option<Tz>,
    pub events_file: Option<PathBuf>,
    pub accent_color: String,
    pub font: String,
}
impl SwipeableConfig {
    pub fn now(&self) -> NaiveDateTime {
        now_in(self.time_zone, Utc::now())
    }
}

impl SwipeableSpec {
    /// A spec with every optional key at its default.
    pub fn new(number_of_days: u8) -> Self {
        Self {
            number_of_days,
            selected_date: None,
            events_file: None,
            format_date_header: default_header_format(),
            header_style: HeaderStyle::default(),
            page_width: default_page_width(),
            time_column_width: default_time_column_width(),
            slot_height: default_slot_height(),
            time_zone: None,
            accent_color: default_accent(),
            font: default_font(),
        }
    }
    pub fn validate(&self) -> Result<SwipeableConfig, SwipecalError> {
        self.validate_at(Utc::now())
    }
    /// Validates against a fixed clock, which is where a missing
    /// `selected_date` starts.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<SwipeableConfig, SwipecalError> {
        let number_of_days = NumberOfDays::try_from(self.number_of_days)?;

        let time_zone = self
            .time_zone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>().map_err(|e| {
                    swipecal_err!(
                        SwipecalErrorKind::InvalidAttribute,
                        "Unknown time_zone `{}`: {}",
                        name,
                        e
                    )
                })
            })
            .transpose()?;

        let selected_date = match self.selected_date.as_deref() {
            Some(raw) => parse_date_time(raw)?,
            None => now_in(time_zone, now),
        };

        let format_date_header = HeaderFormat::parse(&self.format_date_header)?;
        let viewport = Viewport::new(self.page_width)?;

        for (name, value) in [
            ("time_column_width", self.time_column_width),
            ("slot_height", self.slot_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(swipecal_err!(
                    SwipecalErrorKind::InvalidAttribute,
                    "{} must be a positive number, got {}",
                    name,
                    value
                ));
            }
        }
        if let Some(size) = self.header_style.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(swipecal_err!(
                    SwipecalErrorKind::InvalidAttribute,
                    "header_style.font_size must be a positive number, got {}",
                    size
                ));
            }
        }

        Ok(SwipeableConfig {
            number_of_days,
            selected_date,
            format_date_header,
            header_style: self.header_style.clone(),
            viewport,
            time_column_width: self.time_column_width,
            slot_height: self.slot_height,
            time_zone,
            events_file: self.events_file.clone(),
            accent_color: self.accent_color.clone(),
            font: self.font.clone(),
        })
    }
}

pub fn now_in(time_zone: Option<Tz>, now: DateTime<Utc>) -> NaiveDateTime {
    match time_zone {
        Some(tz) => now.with_timezone(&tz).naive_local(),
        None => now.with_timezone(&Local).naive_local(),
    }
}

pub fn spec_from_json_str(s: &str) -> Result<SwipeableSpec, SwipecalError> {
    serde_json::from_str::<SwipeableSpec>(s)
        .map_err(|e| swipecal_err!(SwipecalErrorKind::Deserialize, e.to_string()))
}

pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<SwipeableSpec, SwipecalError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(swipecal_err!(
            SwipecalErrorKind::FileExist,
            "Config file {} does not exist",
            path.display()
        ));
    }
    let file = File::open(path)
        .map_err(|e| swipecal_err!(SwipecalErrorKind::FileOpen, e.to_string()))?;

    let reader = BufReader::new(file);

    serde_json::from_reader::<_, SwipeableSpec>(reader)
        .map_err(|e| swipecal_err!(SwipecalErrorKind::Deserialize, e.to_string()))
}

fn default_header_format() -> String {
    crate::calendar::header::DEFAULT_HEADER_FORMAT.into()
}
fn default_page_width() -> f64 {
    320.0
}
fn default_time_column_width() -> f64 {
    48.0
}
fn default_slot_height() -> f64 {
    40.0
}
fn default_accent() -> String {
    "#bf4759".into()
}
fn default_font() -> String {
    "Sans".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap()
    }

    #[test]
    fn minimal_spec_uses_defaults() {
        let spec = spec_from_json_str(r#"{ "number_of_days": 3, "time_zone": "UTC" }"#).unwrap();
        let config = spec.validate_at(fixed_now()).unwrap();

        assert_eq!(config.number_of_days, NumberOfDays::Three);
        assert_eq!(config.selected_date, fixed_now().naive_utc());
        assert_eq!(config.format_date_header, HeaderFormat::default());
        assert_eq!(config.viewport.page_width(), 320.0);
        assert_eq!(config.slot_height, 40.0);
        assert!(config.events_file.is_none());
        assert_eq!(config.header_style, HeaderStyle::default());
    }

    #[test]
    fn number_of_days_is_required_and_checked() {
        let err = spec_from_json_str("{}").unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::Deserialize);

        let spec = spec_from_json_str(r#"{ "number_of_days": 4 }"#).unwrap();
        let err = spec.validate_at(fixed_now()).unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::InvalidAttribute);
        assert!(err.message.contains("3, 5 or 7"));
    }

    #[test]
    fn time_zone_shifts_default_selected_date() {
        let spec = spec_from_json_str(
            r#"{ "number_of_days": 7, "time_zone": "Asia/Tokyo" }"#,
        )
        .unwrap();
        let config = spec.validate_at(fixed_now()).unwrap();
        assert_eq!(
            config.selected_date.date(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
        );

        let spec =
            spec_from_json_str(r#"{ "number_of_days": 7, "time_zone": "Mars/Olympus" }"#).unwrap();
        assert!(spec.validate_at(fixed_now()).is_err());
    }

    #[test]
    fn explicit_values_are_kept() {
        let spec = spec_from_json_str(
            r##"{
                "number_of_days": 5,
                "selected_date": "2024-02-29",
                "format_date_header": "%d.%m",
                "header_style": { "color": "#ffffff", "font_size": 14.0 },
                "page_width": 500,
                "events_file": "~/events.json"
            }"##,
        )
        .unwrap();
        let config = spec.validate_at(fixed_now()).unwrap();
        assert_eq!(config.selected_date.to_string(), "2024-02-29 00:00:00");
        assert_eq!(config.format_date_header.as_str(), "%d.%m");
        assert_eq!(config.header_style.color.as_deref(), Some("#ffffff"));
        assert_eq!(config.viewport.center_offset(), 1000.0);
        assert_eq!(config.events_file, Some(PathBuf::from("~/events.json")));
    }

    #[test]
    fn rejects_bad_layout_and_formats() {
        for json in [
            r#"{ "number_of_days": 3, "page_width": 0 }"#,
            r#"{ "number_of_days": 3, "slot_height": -4 }"#,
            r#"{ "number_of_days": 3, "format_date_header": "%Q" }"#,
            r#"{ "number_of_days": 3, "selected_date": "yesterday" }"#,
            r#"{ "number_of_days": 3, "header_style": { "font_size": 0 } }"#,
        ] {
            let spec = spec_from_json_str(json).unwrap();
            assert!(spec.validate_at(fixed_now()).is_err(), "{json} should fail");
        }
    }

    #[test]
    fn programmatic_spec_matches_file_defaults() {
        let from_file = spec_from_json_str(r#"{ "number_of_days": 5 }"#).unwrap();
        let built = SwipeableSpec::new(5);
        assert_eq!(built.format_date_header, from_file.format_date_header);
        assert_eq!(built.page_width, from_file.page_width);
        assert_eq!(built.accent_color, from_file.accent_color);
        assert!(built.validate_at(fixed_now()).is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_spec("/nonexistent/swipecal/config.json").unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::FileExist);
    }
}
