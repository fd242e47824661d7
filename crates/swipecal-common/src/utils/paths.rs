use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

pub fn expand_path<T: AsRef<Path>>(path: T, home: &Path) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    if let Some(std::path::Component::Normal(first)) = components.next() {
        if first == "~" {
            return home.join(components.as_path());
        }
    }
    path.to_path_buf()
}
pub fn home_dir() -> Result<PathBuf, SwipecalError> {
    std::env::var("HOME")
        .map_err(|e| swipecal_err!(SwipecalErrorKind::EnvVar, e.to_string()))
        .map(PathBuf::from)
}

/// Expands a leading `~` against `$HOME`. Paths without one are returned as is.
pub fn resolve_user_path<T: AsRef<Path>>(path: T) -> Result<PathBuf, SwipecalError> {
    let path = path.as_ref();
    if path.starts_with("~") {
        Ok(expand_path(path, &home_dir()?))
    } else {
        Ok(path.to_path_buf())
    }
}

fn get_xdg_dirs() -> xdg::BaseDirectories {
    xdg::BaseDirectories::with_prefix("swipecal")
}

/// Returns the configuration directory, `$XDG_CONFIG_HOME/swipecal`.
/// If the directory does not exist, it will be created.
pub fn get_config_dir() -> Result<PathBuf, SwipecalError> {
    let xdg_dirs = get_xdg_dirs();
    let dir = xdg_dirs.get_config_home().ok_or_else(|| {
        swipecal_err!(SwipecalErrorKind::DirRead, "Could not find config directory")
    })?;
    fs::create_dir_all(&dir)
        .map_err(|e| swipecal_err!(SwipecalErrorKind::DirCreate, e.to_string()))?;
    Ok(dir)
}

/// Default location of the widget configuration file.
pub fn default_config_file() -> Result<PathBuf, SwipecalError> {
    Ok(get_config_dir()?.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix_only() {
        let home = Path::new("/home/cal");
        assert_eq!(
            expand_path("~/events.json", home),
            PathBuf::from("/home/cal/events.json")
        );
        assert_eq!(
            expand_path("/etc/events.json", home),
            PathBuf::from("/etc/events.json")
        );
        assert_eq!(
            expand_path("data/~/events.json", home),
            PathBuf::from("data/~/events.json")
        );
    }
}
