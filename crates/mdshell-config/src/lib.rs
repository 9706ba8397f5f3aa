//! Shared configuration for the mdshell host.
//!
//! TOML file + `MDSHELL_` environment overrides, layered on built-in
//! defaults with figment, and translated into the initial
//! [`StateSnapshot`] the state store starts from. Nothing is ever written
//! back: user choices made at runtime live only in the store.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use mdshell_core::{
    ApplicationState, Capability, ColorTheme, DeviceState, MainView, StateSnapshot,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("config serialization failed: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub appearance: Appearance,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default)]
    pub startup: Startup,

    #[serde(default)]
    pub device: Device,

    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Appearance {
    /// "light", "dark", "dark-blue" or "system".
    #[serde(default)]
    pub color_theme: ColorTheme,

    /// Start in the legacy alternate shell.
    #[serde(default)]
    pub vintage_mode: bool,

    /// Override the detected system dark/light preference.
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Layout {
    #[serde(default)]
    pub page_full_width: bool,

    #[serde(default)]
    pub page_full_height: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Startup {
    /// Initial main view. Unknown values leave the content area blank.
    #[serde(default = "default_main_view")]
    pub main_view: String,
}

impl Default for Startup {
    fn default() -> Self {
        Self {
            main_view: default_main_view(),
        }
    }
}

fn default_main_view() -> String {
    MainView::Welcome.to_string()
}

/// Simulated device, until a real device layer feeds the store.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Device {
    /// Capability tokens, e.g. `["contentList", "playbackControl"]`.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Logging {
    /// Log file path; the CLI default applies when unset.
    pub file: Option<PathBuf>,

    /// `tracing` filter directive, e.g. "mdshell_core=debug".
    pub filter: Option<String>,
}

impl Config {
    /// Parse the capability list strictly.
    pub fn capabilities(&self) -> Result<Vec<Capability>, ConfigError> {
        self.device
            .capabilities
            .iter()
            .map(|token| {
                token.parse().map_err(|e| ConfigError::Validation {
                    field: "device.capabilities".into(),
                    reason: format!("{e}"),
                })
            })
            .collect()
    }

    /// The snapshot the state store starts from.
    pub fn initial_snapshot(&self) -> Result<StateSnapshot, ConfigError> {
        let app = ApplicationState {
            main_view: MainView::parse_lenient(&self.startup.main_view),
            loading: false,
            page_full_height: self.layout.page_full_height,
            page_full_width: self.layout.page_full_width,
            color_theme: self.appearance.color_theme,
            vintage_mode: self.appearance.vintage_mode,
        };
        let device = DeviceState::with_capabilities(self.capabilities()?);
        Ok(StateSnapshot { app, device })
    }
}

impl Config {
    /// The effective config as TOML, suitable as a starting `config.toml`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "mdshell", "mdshell").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("mdshell");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MDSHELL_").split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());

        let snap = config.initial_snapshot().unwrap();
        assert_eq!(snap, StateSnapshot::default());
    }

    #[test]
    fn file_values_reach_initial_snapshot() {
        let file = write_config(
            r#"
            [appearance]
            color_theme = "dark-blue"
            prefers_dark = true

            [layout]
            page_full_height = true

            [startup]
            main_view = "FACTORY"

            [device]
            capabilities = ["contentList", "discEject"]
            "#,
        );
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.appearance.prefers_dark, Some(true));

        let snap = config.initial_snapshot().unwrap();
        assert_eq!(snap.app.color_theme, ColorTheme::DarkBlue);
        assert_eq!(snap.app.main_view, Some(MainView::Factory));
        assert!(snap.app.page_full_height);
        assert!(!snap.app.page_full_width);
        assert!(snap.device.has_capability(Capability::ContentList));
        assert!(snap.device.has_capability(Capability::DiscEject));
    }

    #[test]
    fn unknown_main_view_starts_blank() {
        let file = write_config("[startup]\nmain_view = \"SETTINGS\"\n");
        let snap = load_config_from(file.path())
            .unwrap()
            .initial_snapshot()
            .unwrap();
        assert_eq!(snap.app.main_view, None);
    }

    #[test]
    fn unknown_capability_is_rejected() {
        let file = write_config("[device]\ncapabilities = [\"teleport\"]\n");
        let err = load_config_from(file.path())
            .unwrap()
            .initial_snapshot()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "device.capabilities"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn printed_config_loads_back() {
        let mut config = Config::default();
        config.appearance.color_theme = ColorTheme::Light;
        config.layout.page_full_width = true;
        config.device.capabilities = vec!["contentList".into()];

        let file = write_config(&config.to_toml().unwrap());
        assert_eq!(load_config_from(file.path()).unwrap(), config);
    }

    #[test]
    fn unknown_color_theme_fails_to_load() {
        let file = write_config("[appearance]\ncolor_theme = \"sepia\"\n");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::Figment(_))
        ));
    }
}
