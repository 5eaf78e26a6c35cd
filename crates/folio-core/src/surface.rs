//! Perceived background estimation for translucent accent cards.

use crate::color::{Color, Rgb, blend_over, parse_color};
use crate::dom::Element;
use tracing::warn;

pub const LIGHT_PAGE_BACKGROUND: Rgb = Rgb::new(245.0, 245.0, 247.0);
pub const DARK_PAGE_BACKGROUND: Rgb = Rgb::new(11.0, 11.0, 15.0);

pub const PRIMARY_VAR: &str = "--card-primary";
pub const SECONDARY_VAR: &str = "--card-secondary";
pub const PRIMARY_ALPHA_VAR: &str = "--card-primary-alpha";
pub const SECONDARY_ALPHA_VAR: &str = "--card-secondary-alpha";

/// Accent opacities used when a card does not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentAlphas {
    pub primary: f64,
    pub secondary: f64,
}

impl AccentAlphas {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                primary: 0.28,
                secondary: 0.18,
            }
        } else {
            Self {
                primary: 0.16,
                secondary: 0.10,
            }
        }
    }
}

pub fn page_background(dark_mode: bool) -> Rgb {
    if dark_mode {
        DARK_PAGE_BACKGROUND
    } else {
        LIGHT_PAGE_BACKGROUND
    }
}

/// Estimate the color a reader sees behind `element`.
///
/// Each declared accent is composited over the page background at its
/// effective opacity and the samples are averaged. Without accents the
/// element's computed background is composited instead; with nothing at all
/// the page background is returned unchanged.
pub fn estimate_surface_color(element: &Element, dark_mode: bool) -> Rgb {
    let page = page_background(dark_mode);
    let defaults = AccentAlphas::for_mode(dark_mode);
    let accents = [
        (PRIMARY_VAR, PRIMARY_ALPHA_VAR, defaults.primary),
        (SECONDARY_VAR, SECONDARY_ALPHA_VAR, defaults.secondary),
    ];

    let mut samples = Vec::with_capacity(2);
    for (color_var, alpha_var, default_alpha) in accents {
        let Some(declared) = element.style_var(color_var).map(str::trim) else {
            continue;
        };
        if declared.is_empty() {
            continue;
        }
        let alpha = alpha_override(element, alpha_var).unwrap_or(default_alpha);
        let sample = match parse_color(declared) {
            Some(accent) => {
                let effective = Color {
                    a: accent.a * alpha,
                    ..accent
                };
                blend_over(effective, page)
            }
            None => {
                warn!(var = color_var, value = declared, "Unparseable card accent");
                page
            }
        };
        samples.push(sample);
    }

    if samples.is_empty() {
        if let Some(computed) = element.computed_background().and_then(parse_color) {
            samples.push(blend_over(computed, page));
        }
    }

    mean(&samples).unwrap_or(page)
}

fn alpha_override(element: &Element, var: &str) -> Option<f64> {
    element
        .style_var(var)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|alpha| alpha.is_finite())
}

fn mean(samples: &[Rgb]) -> Option<Rgb> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as f64;
    let (r, g, b) = samples
        .iter()
        .fold((0.0, 0.0, 0.0), |(r, g, b), s| (r + s.r, g + s.g, b + s.b));
    Some(Rgb::new(r / count, g / count, b / count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeId};

    fn card(doc: &mut Document) -> NodeId {
        let body = doc.body();
        doc.create_element("article", body)
    }

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
    }

    #[test]
    fn no_accents_and_no_computed_background_is_the_page() {
        let mut doc = Document::new();
        let node = card(&mut doc);
        let element = doc.get(node).expect("card exists");
        assert_eq!(estimate_surface_color(element, false), LIGHT_PAGE_BACKGROUND);
        assert_eq!(estimate_surface_color(element, true), DARK_PAGE_BACKGROUND);
    }

    #[test]
    fn single_accent_blends_at_default_alpha() {
        let mut doc = Document::new();
        let node = card(&mut doc);
        doc.set_style_var(node, PRIMARY_VAR, "#007aff");
        let element = doc.get(node).expect("card exists");

        let expected = blend_over(
            Rgb::new(0.0, 122.0, 255.0).with_alpha(0.16),
            LIGHT_PAGE_BACKGROUND,
        );
        assert!(close(estimate_surface_color(element, false), expected));
    }

    #[test]
    fn two_accents_average_and_overrides_scale_declared_alpha() {
        let mut doc = Document::new();
        let node = card(&mut doc);
        doc.set_style_var(node, PRIMARY_VAR, "rgba(255, 0, 0, 0.5)");
        doc.set_style_var(node, PRIMARY_ALPHA_VAR, "0.4");
        doc.set_style_var(node, SECONDARY_VAR, "#0000ff");
        let element = doc.get(node).expect("card exists");

        let red = blend_over(Rgb::new(255.0, 0.0, 0.0).with_alpha(0.2), DARK_PAGE_BACKGROUND);
        let blue = blend_over(Rgb::new(0.0, 0.0, 255.0).with_alpha(0.18), DARK_PAGE_BACKGROUND);
        let expected = Rgb::new(
            (red.r + blue.r) / 2.0,
            (red.g + blue.g) / 2.0,
            (red.b + blue.b) / 2.0,
        );
        assert!(close(estimate_surface_color(element, true), expected));
    }

    #[test]
    fn computed_background_is_used_only_without_accents() {
        let mut doc = Document::new();
        let node = card(&mut doc);
        doc.set_computed_background(node, Some("rgb(10, 20, 30)"));
        let expected = Rgb::new(10.0, 20.0, 30.0);
        assert!(close(
            estimate_surface_color(doc.get(node).expect("card exists"), false),
            expected
        ));

        doc.set_style_var(node, PRIMARY_VAR, "not-a-color");
        assert!(close(
            estimate_surface_color(doc.get(node).expect("card exists"), false),
            LIGHT_PAGE_BACKGROUND
        ));
    }
}
