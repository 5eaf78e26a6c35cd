//! Palette bridging the viewer's theme mode and the iced theme, plus the
//! colors the view paints cards with.

use crate::config::ThemeMode;
use folio_core::color::{Rgb, parse_color};
use iced::{Color, Theme as IcedTheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Page background behind every card.
    pub fn page_background(self) -> Color {
        to_iced(folio_core::surface::page_background(matches!(self, Theme::Dark)))
    }
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        }
    }
}

impl From<Theme> for IcedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => IcedTheme::Light,
            Theme::Dark => IcedTheme::Dark,
        }
    }
}

pub fn to_iced(rgb: Rgb) -> Color {
    Color::from_rgb(channel(rgb.r), channel(rgb.g), channel(rgb.b))
}

fn channel(value: f64) -> f32 {
    (value / 255.0).clamp(0.0, 1.0) as f32
}

/// Parse a CSS color token into an iced color, keeping its alpha.
pub fn css_color(text: &str) -> Option<Color> {
    let color = parse_color(text)?;
    Some(Color {
        a: color.a.clamp(0.0, 1.0) as f32,
        ..to_iced(color.rgb())
    })
}
