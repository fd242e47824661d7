use std::path::PathBuf;

use clap::Parser;
use swipecal_common::{
    calendar::EventStore,
    config::{SwipeableConfig, SwipeableSpec, load_spec},
    swipecal_err,
    utils::{
        errors::{SwipecalError, SwipecalErrorKind},
        paths::{default_config_file, resolve_user_path},
    },
};

/// A paginated multi-day calendar.
#[derive(Parser, Debug, Default)]
#[command(name = "swipecal", version, about)]
pub struct Flags {
    /// Config file to read instead of the default one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Days shown per page (3, 5 or 7)
    #[arg(short = 'n', long)]
    pub days: Option<u8>,

    /// Date the calendar opens on, e.g. 2024-03-01 or 2024-03-01T09:30
    #[arg(short, long)]
    pub date: Option<String>,

    /// JSON file holding the events to draw
    #[arg(short, long)]
    pub events: Option<PathBuf>,
}

pub struct LoadedConfig {
    pub config: SwipeableConfig,
    pub events: EventStore,
}

/// Picks the spec to start from, then lays the flags over it.
/// `default_file` is only read when no `--config` was given.
fn resolve_spec(
    flags: &Flags,
    default_file: Option<PathBuf>,
) -> Result<SwipeableSpec, SwipecalError> {
    let mut spec = match (&flags.config, default_file) {
        (Some(path), _) => load_spec(resolve_user_path(path)?)?,
        (None, Some(path)) if path.exists() => load_spec(path)?,
        _ => {
            let days = flags.days.ok_or_else(|| {
                swipecal_err!(
                    SwipecalErrorKind::UndefinedAttribute,
                    "number_of_days is required: pass --days or set it in the config file"
                )
            })?;
            SwipeableSpec::new(days)
        }
    };

    if let Some(days) = flags.days {
        spec.number_of_days = days;
    }
    if let Some(date) = &flags.date {
        spec.selected_date = Some(date.clone());
    }
    if let Some(events) = &flags.events {
        spec.events_file = Some(events.clone());
    }
    Ok(spec)
}

fn load_events(config: &SwipeableConfig) -> EventStore {
    let Some(path) = &config.events_file else {
        return EventStore::default();
    };
    match resolve_user_path(path).and_then(EventStore::load) {
        Ok(store) => {
            log::info!("Loaded {} events from {}", store.len(), path.display());
            store
        }
        Err(e) => {
            log::warn!("Continuing without events: {e}");
            EventStore::default()
        }
    }
}

pub fn load_config(flags: &Flags) -> Result<LoadedConfig, SwipecalError> {
    let default_file = match default_config_file() {
        Ok(path) => Some(path),
        Err(e) => {
            log::debug!("No default config location: {e}");
            None
        }
    };
    let config = resolve_spec(flags, default_file)?.validate()?;
    log::debug!(
        "Showing {} days from {}",
        config.number_of_days,
        config.selected_date
    );
    let events = load_events(&config);

    Ok(LoadedConfig { config, events })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_flag_is_enough_without_a_file() {
        let flags = Flags {
            days: Some(5),
            date: Some("2024-03-01".into()),
            ..Default::default()
        };
        let spec = resolve_spec(&flags, None).unwrap();
        assert_eq!(spec.number_of_days, 5);
        assert_eq!(spec.selected_date.as_deref(), Some("2024-03-01"));
        assert!(spec.events_file.is_none());
    }

    #[test]
    fn missing_days_is_an_error() {
        let err = resolve_spec(&Flags::default(), None).unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::UndefinedAttribute);
    }

    #[test]
    fn nonexistent_default_file_falls_back_to_flags() {
        let flags = Flags {
            days: Some(3),
            ..Default::default()
        };
        let spec = resolve_spec(&flags, Some(PathBuf::from("/nonexistent/swipecal.json"))).unwrap();
        assert_eq!(spec.number_of_days, 3);
    }

    #[test]
    fn explicit_config_must_exist() {
        let flags = Flags {
            config: Some(PathBuf::from("/nonexistent/swipecal.json")),
            days: Some(3),
            ..Default::default()
        };
        let err = resolve_spec(&flags, None).unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::FileExist);
    }

    #[test]
    fn invalid_days_fail_validation() {
        let flags = Flags {
            days: Some(4),
            ..Default::default()
        };
        let err = resolve_spec(&flags, None)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err.kind, SwipecalErrorKind::InvalidAttribute);
    }
}
