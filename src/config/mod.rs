use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::popup::PopupOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "popwin";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_INVOKER_GAP: i32 = 5;

/// Popup settings from the `popup` section of `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub always_on_top: bool,
    /// Vertical gap between the invoker's bottom edge and the popup.
    pub invoker_gap: i32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            always_on_top: PopupOptions::default().always_on_top,
            invoker_gap: DEFAULT_INVOKER_GAP,
        }
    }
}

impl PopupConfig {
    pub fn options(&self) -> PopupOptions {
        PopupOptions {
            always_on_top: self.always_on_top,
        }
    }
}

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub popup: PopupConfig,
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(%err, "no config directory; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "popwin-config-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join(APP_DIR)).expect("scratch dir should be creatable");
        dir
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "popwin",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/popwin/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "popwin",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/popwin/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("popwin", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = load_app_config_with(Some(Path::new("/nonexistent/popwin-root")), None);
        assert_eq!(config, AppConfig::default());
        assert!(config.popup.always_on_top);
        assert_eq!(config.popup.invoker_gap, 5);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let root = scratch_dir("partial");
        std::fs::write(
            root.join(APP_DIR).join(APP_CONFIG_FILE),
            r#"{ "debug_logging": true, "popup": { "invoker_gap": 12 } }"#,
        )
        .expect("config should be writable");

        let config = load_app_config_with(Some(root.as_path()), None);
        assert!(config.debug_logging);
        assert_eq!(config.popup.invoker_gap, 12);
        assert!(config.popup.always_on_top);
        assert_eq!(config.popup.options(), PopupOptions::default());

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let root = scratch_dir("malformed");
        std::fs::write(root.join(APP_DIR).join(APP_CONFIG_FILE), "{ not json")
            .expect("config should be writable");

        assert_eq!(load_app_config_with(Some(root.as_path()), None), AppConfig::default());

        let _ = std::fs::remove_dir_all(root);
    }
}
