//! Palettes for each resolved theme variant, plus semantic styles.
//!
//! The shell only hands out a [`ThemeVariant`]; [`PaletteFactory`] turns it
//! into the concrete colors the views draw with.

use mdshell_core::{ThemeFactory, ThemeVariant};
use ratatui::style::{Color, Modifier, Style};

// ── Shared accents ────────────────────────────────────────────────────

pub const BLUE_LIGHT: Color = Color::Rgb(110, 198, 255); // #6ec6ff
pub const BLUE: Color = Color::Rgb(33, 150, 243); // #2196f3
pub const BLUE_DARK: Color = Color::Rgb(0, 105, 192); // #0069c0
pub const LAVENDER: Color = Color::Rgb(125, 131, 189); // #7d83bd

// ── Legacy shell chrome ──────────────────────────────────────────────

pub const LEGACY_FACE: Color = Color::Rgb(192, 192, 192); // #c0c0c0
pub const LEGACY_SHADOW: Color = Color::Rgb(128, 128, 128); // #808080
pub const LEGACY_TITLE: Color = Color::Rgb(0, 0, 128); // #000080
pub const LEGACY_DESKTOP: Color = Color::Rgb(0, 128, 128); // #008080

/// Concrete colors for one theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub variant: ThemeVariant,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_dim: Color,
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub border: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            variant: ThemeVariant::Light,
            background: Color::Rgb(250, 250, 250),
            surface: Color::Rgb(255, 255, 255),
            text: Color::Rgb(33, 33, 33),
            text_dim: Color::Rgb(117, 117, 117),
            primary: Color::Rgb(25, 118, 210),
            primary_light: Color::Rgb(66, 165, 245),
            primary_dark: Color::Rgb(21, 101, 192),
            secondary: Color::Rgb(156, 39, 176),
            border: Color::Rgb(189, 189, 189),
        }
    }

    pub fn dark() -> Self {
        Self {
            variant: ThemeVariant::Dark,
            background: Color::Rgb(18, 18, 18),
            surface: Color::Rgb(30, 30, 30),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(176, 176, 176),
            primary: BLUE,
            primary_light: BLUE_LIGHT,
            primary_dark: BLUE_DARK,
            secondary: Color::Rgb(206, 147, 216),
            border: Color::Rgb(80, 80, 80),
        }
    }

    /// Dark variant with a blue-gray secondary accent.
    pub fn dark_blue() -> Self {
        Self {
            variant: ThemeVariant::DarkBlue,
            secondary: LAVENDER,
            border: Color::Rgb(60, 72, 96),
            ..Self::dark()
        }
    }

    // ── Semantic styles ──────────────────────────────────────────────

    /// Page background behind the content panel.
    pub fn page(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    /// The content panel itself.
    pub fn panel(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }

    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.border).bg(self.surface)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Highlighted list row.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn key_hint_key(&self) -> Style {
        Style::default()
            .fg(self.primary_light)
            .add_modifier(Modifier::BOLD)
    }
}

/// Builds palettes for resolved variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteFactory;

impl ThemeFactory for PaletteFactory {
    type Theme = Palette;

    fn build(&self, variant: ThemeVariant) -> Palette {
        match variant {
            ThemeVariant::Light => Palette::light(),
            ThemeVariant::Dark => Palette::dark(),
            ThemeVariant::DarkBlue => Palette::dark_blue(),
        }
    }
}
