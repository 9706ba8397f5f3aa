//! Theme resolution: preference + system signal → concrete variant.

use crate::model::{ColorTheme, ThemeVariant};

/// Map a color theme preference and the current system "prefers dark"
/// signal to a concrete theme variant.
///
/// Depends only on its inputs; callers re-run it whenever either changes.
pub fn resolve_theme(preference: ColorTheme, prefers_dark: bool) -> ThemeVariant {
    match preference {
        ColorTheme::Light => ThemeVariant::Light,
        ColorTheme::Dark => ThemeVariant::Dark,
        ColorTheme::DarkBlue => ThemeVariant::DarkBlue,
        ColorTheme::System if prefers_dark => ThemeVariant::Dark,
        ColorTheme::System => ThemeVariant::Light,
    }
}

/// Builds the render layer's applied-theme object for a variant.
///
/// The shell hands out variants only; what a `Theme` contains is up to the
/// render layer.
pub trait ThemeFactory {
    type Theme;

    fn build(&self, variant: ThemeVariant) -> Self::Theme;
}
