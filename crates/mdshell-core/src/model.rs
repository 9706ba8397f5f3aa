// ── Shell data model ──
//
// Snapshot types read by the resolvers. The application and device state
// are owned by the host's store; the core only ever sees clones.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use tracing::warn;

use crate::error::CoreError;

/// Parse a token by matching it against the strum names of every variant.
fn parse_token<T>(kind: &'static str, value: &str) -> Result<T, CoreError>
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .find(|variant| variant.as_ref() == value)
        .ok_or_else(|| CoreError::unknown_token(kind, value, T::iter()))
}

// ── Main view ──────────────────────────────────────────────────────

/// Discriminant selecting the top-level content view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MainView {
    Welcome,
    Main,
    Factory,
}

impl MainView {
    /// Lenient parse used at the state-store boundary. Anything outside the
    /// closed set (including an empty string) becomes `None`, which the
    /// view switch renders as a blank content area.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.parse() {
            Ok(view) => Some(view),
            Err(_) => {
                if !value.is_empty() {
                    warn!(value, "unrecognized main view, content area will be blank");
                }
                None
            }
        }
    }
}

impl FromStr for MainView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("main view", s)
    }
}

// ── Color theme preference ─────────────────────────────────────────

/// User-selected theme setting. `System` defers to the OS preference.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorTheme {
    Light,
    Dark,
    DarkBlue,
    #[default]
    System,
}

impl ColorTheme {
    /// Next preference in cycling order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::DarkBlue,
            Self::DarkBlue => Self::System,
            Self::System => Self::Light,
        }
    }
}

impl FromStr for ColorTheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("color theme", s)
    }
}

/// A concrete theme variant, produced by reconciling the preference with
/// the system signal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ThemeVariant {
    Light,
    Dark,
    DarkBlue,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 3] = [Self::Light, Self::Dark, Self::DarkBlue];

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark | Self::DarkBlue)
    }
}

// ── Device capabilities ────────────────────────────────────────────

/// Feature tokens advertised by a connected device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Capability {
    ContentList,
    PlaybackControl,
    MetadataEdit,
    TrackUpload,
    TrackDownload,
    PlayingDiscUpload,
    FactoryMode,
    HimdTitles,
    FullWidthSupport,
    NativeMonoUpload,
    RequiresManualFlush,
    DiscEject,
}

impl FromStr for Capability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("capability", s)
    }
}

// ── State snapshots ────────────────────────────────────────────────

/// Application-level presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationState {
    /// `None` when unset or outside the known views.
    pub main_view: Option<MainView>,
    pub loading: bool,
    pub page_full_height: bool,
    pub page_full_width: bool,
    pub color_theme: ColorTheme,
    pub vintage_mode: bool,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            main_view: Some(MainView::Welcome),
            loading: false,
            page_full_height: false,
            page_full_width: false,
            color_theme: ColorTheme::default(),
            vintage_mode: false,
        }
    }
}

/// State reported by the device layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub device_capabilities: BTreeSet<Capability>,
}

impl DeviceState {
    pub fn with_capabilities<I>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        Self {
            device_capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Membership query against the capability set.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.device_capabilities.contains(&capability)
    }
}

/// One coherent observation of everything the shell reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub app: ApplicationState,
    pub device: DeviceState,
}
