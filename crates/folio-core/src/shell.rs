//! The static page skeleton the renderers mount into.

use crate::dom::Document;
use crate::timeline::{CLOSE_ATTR, MODAL_DESCRIPTION_ID, MODAL_ID, MODAL_META_ID, MODAL_TITLE_ID};

pub const GREETING_ID: &str = "greeting";
pub const GREETING_PLATFORM_ID: &str = "greeting-platform";
pub const INTRO_ID: &str = "intro";
pub const INTRO_TYPEWRITER_ID: &str = "intro-typewriter";
pub const SKILLS_ID: &str = "skills";
pub const PROJECTS_ID: &str = "projects";
pub const PROJECTS_TYPEWRITER_ID: &str = "projects-typewriter";
pub const SOCIALS_ID: &str = "socials";
pub const TIMELINE_ID: &str = "timeline";
pub const MODAL_CLOSE_ID: &str = "timeline-modal-close";

/// Every container the page expects, with the modal hidden.
pub fn standard_shell() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let greeting = doc.create_with_id("header", GREETING_ID, body);
    let platform = doc.create_with_id("span", GREETING_PLATFORM_ID, greeting);
    doc.set_attribute(platform, "aria-live", "polite");

    let intro = doc.create_with_id("section", INTRO_ID, body);
    let intro_tw = doc.create_with_id("p", INTRO_TYPEWRITER_ID, intro);
    doc.add_class(intro_tw, "typewriter");

    doc.create_with_id("section", SKILLS_ID, body);

    let projects = doc.create_with_id("section", PROJECTS_ID, body);
    let projects_tw = doc.create_with_id("p", PROJECTS_TYPEWRITER_ID, projects);
    doc.add_class(projects_tw, "typewriter");

    doc.create_with_id("section", SOCIALS_ID, body);

    let timeline = doc.create_with_id("section", TIMELINE_ID, body);
    doc.add_class(timeline, "timeline");
    doc.set_attribute(timeline, "tabindex", "0");

    let modal = doc.create_with_id("div", MODAL_ID, body);
    doc.set_attribute(modal, "role", "dialog");
    doc.set_attribute(modal, "aria-modal", "true");
    doc.set_attribute(modal, "aria-hidden", "true");
    doc.set_flag(modal, "hidden", true);
    let backdrop = doc.create_element("div", modal);
    doc.add_class(backdrop, "modal-backdrop");
    doc.set_attribute(backdrop, CLOSE_ATTR, "");
    let panel = doc.create_element("div", modal);
    doc.add_class(panel, "modal-panel");
    let close = doc.create_with_id("button", MODAL_CLOSE_ID, panel);
    doc.set_attribute(close, CLOSE_ATTR, "");
    doc.set_attribute(close, "aria-label", "Close");
    doc.create_with_id("h2", MODAL_TITLE_ID, panel);
    doc.create_with_id("p", MODAL_META_ID, panel);
    doc.create_with_id("div", MODAL_DESCRIPTION_ID, panel);

    doc
}
