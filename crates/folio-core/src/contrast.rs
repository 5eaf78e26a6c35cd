//! Readable text tokens for expandable cards.

use crate::color::{Rgb, contrast_ratio, parse_rgb_or};
use crate::dom::{Document, NodeId};
use crate::surface::estimate_surface_color;
use tracing::debug;

pub const CARD_CLASS: &str = "expandable-card";
pub const TIMELINE_CLASS: &str = "timeline";
pub const TEXT_VAR: &str = "--card-text";
pub const MUTED_VAR: &str = "--card-muted";

/// A text color and its muted companion, as CSS values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTokens {
    pub text: &'static str,
    pub muted: &'static str,
}

pub const DARK_TEXT: TextTokens = TextTokens {
    text: "#1d1d1f",
    muted: "#6e6e73",
};

pub const LIGHT_TEXT: TextTokens = TextTokens {
    text: "#f5f5f7",
    muted: "#a1a1a6",
};

/// Timeline cards sit on photography, whatever the site theme.
pub const TIMELINE_TEXT: TextTokens = TextTokens {
    text: "#ffffff",
    muted: "rgba(255, 255, 255, 0.78)",
};

/// Pick dark or light text for `surface`; ties go to dark text.
pub fn pick_text_tokens(surface: Rgb) -> TextTokens {
    let dark = contrast_ratio(surface, parse_rgb_or(DARK_TEXT.text, Rgb::BLACK));
    let light = contrast_ratio(surface, parse_rgb_or(LIGHT_TEXT.text, Rgb::WHITE));
    if dark >= light { DARK_TEXT } else { LIGHT_TEXT }
}

pub fn tokens_for_card(doc: &Document, card: NodeId, dark_mode: bool) -> Option<TextTokens> {
    let element = doc.get(card)?;
    if doc.closest_with_class(card, TIMELINE_CLASS).is_some() {
        return Some(TIMELINE_TEXT);
    }
    if dark_mode {
        return Some(LIGHT_TEXT);
    }
    Some(pick_text_tokens(estimate_surface_color(element, false)))
}

/// Set `--card-text` and `--card-muted` on every attached expandable card.
pub fn apply_contrast_theming(doc: &mut Document, dark_mode: bool) {
    let cards = doc.find_by_class(CARD_CLASS);
    for card in &cards {
        let Some(tokens) = tokens_for_card(doc, *card, dark_mode) else {
            continue;
        };
        doc.set_style_var(*card, TEXT_VAR, tokens.text);
        doc.set_style_var(*card, MUTED_VAR, tokens.muted);
    }
    debug!(cards = cards.len(), dark_mode, "Applied card contrast theming");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PRIMARY_VAR;

    fn snapshot(doc: &Document, node: NodeId) -> (Option<String>, Option<String>) {
        let element = doc.get(node).expect("card exists");
        (
            element.style_var(TEXT_VAR).map(str::to_string),
            element.style_var(MUTED_VAR).map(str::to_string),
        )
    }

    #[test]
    fn light_tinted_card_gets_dark_text_and_is_stable() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.create_element("article", body);
        doc.add_class(card, CARD_CLASS);
        doc.set_style_var(card, PRIMARY_VAR, "#007aff");

        apply_contrast_theming(&mut doc, false);
        let first = snapshot(&doc, card);
        apply_contrast_theming(&mut doc, false);
        assert_eq!(snapshot(&doc, card), first);
        assert_eq!(first.0.as_deref(), Some(DARK_TEXT.text));
    }

    #[test]
    fn saturated_opaque_accent_flips_to_light_text() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.create_element("article", body);
        doc.add_class(card, CARD_CLASS);
        doc.set_style_var(card, PRIMARY_VAR, "#1c1c4a");
        doc.set_style_var(card, "--card-primary-alpha", "1");

        apply_contrast_theming(&mut doc, false);
        assert_eq!(snapshot(&doc, card).0.as_deref(), Some(LIGHT_TEXT.text));
    }

    #[test]
    fn timeline_and_dark_mode_cards_skip_estimation() {
        let mut doc = Document::new();
        let body = doc.body();
        let timeline = doc.create_element("section", body);
        doc.add_class(timeline, TIMELINE_CLASS);
        let slide_card = doc.create_element("article", timeline);
        doc.add_class(slide_card, CARD_CLASS);
        let plain = doc.create_element("article", body);
        doc.add_class(plain, CARD_CLASS);

        apply_contrast_theming(&mut doc, false);
        assert_eq!(snapshot(&doc, slide_card).0.as_deref(), Some(TIMELINE_TEXT.text));
        assert_eq!(snapshot(&doc, plain).0.as_deref(), Some(DARK_TEXT.text));

        apply_contrast_theming(&mut doc, true);
        assert_eq!(snapshot(&doc, slide_card).0.as_deref(), Some(TIMELINE_TEXT.text));
        assert_eq!(snapshot(&doc, plain).1.as_deref(), Some(LIGHT_TEXT.muted));
    }
}
