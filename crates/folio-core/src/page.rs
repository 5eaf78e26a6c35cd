//! Mounting content into the shell and routing interaction.
//!
//! [`Page::mount`] renders every section whose container exists, themes the
//! cards and wires the timeline. Afterwards [`Page::dispatch`] is the single
//! entry point for user interaction; each [`ControlKind`] has one handler.

use crate::content::{Content, Project};
use crate::contrast::{CARD_CLASS, TIMELINE_CLASS, apply_contrast_theming};
use crate::dispatch::{ControlEvent, ControlKind, Reaction};
use crate::dom::{Document, NodeId, ScrollBehavior, escape_html};
use crate::shell::{
    GREETING_ID, GREETING_PLATFORM_ID, INTRO_ID, INTRO_TYPEWRITER_ID, PROJECTS_ID,
    PROJECTS_TYPEWRITER_ID, SKILLS_ID, SOCIALS_ID, TIMELINE_ID,
};
use crate::surface::{PRIMARY_VAR, SECONDARY_VAR};
use crate::tiles::{TileTemplate, details_markup, plan_rows, resolve_colors};
use crate::timeline::{
    DetailModal, MODAL_ID, SlideNodes, TimelinePager, Transition, current_animation,
    set_expand_state, settle_animation,
};
use crate::typewriter::{Highlighter, Script, TypewriterJob};
use tracing::{debug, info};

pub const LIGHT_ACCENT: &str = "#007aff";
pub const DARK_ACCENT: &str = "#0a84ff";

/// The two signals read from the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    pub dark_mode: bool,
    pub reduced_motion: bool,
}

impl Environment {
    pub fn accent(&self) -> &'static str {
        if self.dark_mode { DARK_ACCENT } else { LIGHT_ACCENT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileGroup {
    Pro,
    Hobby,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileNodes {
    pub card: NodeId,
    pub expand: Option<NodeId>,
    pub name: String,
    pub group: TileGroup,
    pub row: usize,
    /// Three-column row.
    pub wide_row: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactNodes {
    pub card: NodeId,
    pub expand: NodeId,
}

#[derive(Debug, Clone)]
pub struct Page {
    content: Content,
    env: Environment,
    highlighter: Highlighter,
    greeting_description: Option<NodeId>,
    platform: Option<NodeId>,
    intro_typewriter: Option<NodeId>,
    projects_typewriter: Option<NodeId>,
    tiles: Vec<TileNodes>,
    contacts: Vec<ContactNodes>,
    pager: Option<TimelinePager>,
    modal: Option<DetailModal>,
}

impl Page {
    pub fn mount(
        doc: &mut Document,
        content: &Content,
        env: Environment,
        template: &dyn TileTemplate,
    ) -> Self {
        let highlighter = Highlighter::from_keywords(&content.greeting.keywords);
        let greeting_description = render_greeting(doc, content, &highlighter, env.accent());
        let platform = content
            .greeting
            .platforms
            .as_ref()
            .and_then(|_| doc.find_by_id(GREETING_PLATFORM_ID));
        render_intro(doc, content);
        render_skills(doc, content);
        let tiles = render_projects(doc, content, template);
        let contacts = render_socials(doc, content);
        let mut pager = render_timeline(doc, content);

        apply_contrast_theming(doc, env.dark_mode);

        let mut modal = DetailModal::locate(doc);
        if let Some(pager) = pager.as_mut() {
            pager.set_active_slide(doc, modal.as_mut(), 0, false, ScrollBehavior::Auto);
        }

        info!(
            tiles = tiles.len(),
            contacts = contacts.len(),
            slides = pager.as_ref().map_or(0, TimelinePager::len),
            dark_mode = env.dark_mode,
            reduced_motion = env.reduced_motion,
            "Mounted page"
        );
        Self {
            content: content.clone(),
            env,
            highlighter,
            greeting_description,
            platform,
            intro_typewriter: doc.find_by_id(INTRO_TYPEWRITER_ID),
            projects_typewriter: doc.find_by_id(PROJECTS_TYPEWRITER_ID),
            tiles,
            contacts,
            pager,
            modal,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn env(&self) -> Environment {
        self.env
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn platform_target(&self) -> Option<NodeId> {
        self.platform
    }

    pub fn tiles(&self) -> &[TileNodes] {
        &self.tiles
    }

    pub fn contacts(&self) -> &[ContactNodes] {
        &self.contacts
    }

    pub fn pager(&self) -> Option<&TimelinePager> {
        self.pager.as_ref()
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    /// Typewriters to start for the current mode: the intro animates
    /// question/answer pairs, the projects header single lines.
    pub fn typewriter_jobs(&self) -> Vec<TypewriterJob> {
        let mut jobs = Vec::new();
        if let Some(target) = self.intro_typewriter {
            jobs.push(TypewriterJob {
                target,
                script: Script::from_raw(&self.content.intro.lines, true),
                highlighter: self.highlighter.clone(),
                accent: self.env.accent().to_string(),
            });
        }
        if let Some(target) = self.projects_typewriter {
            jobs.push(TypewriterJob {
                target,
                script: Script::from_raw(&self.content.projects.lines, false),
                highlighter: self.highlighter.clone(),
                accent: self.env.accent().to_string(),
            });
        }
        jobs
    }

    /// Re-theme for a mode change. Safe to call repeatedly.
    pub fn set_dark_mode(&mut self, doc: &mut Document, dark_mode: bool) {
        self.env.dark_mode = dark_mode;
        apply_contrast_theming(doc, dark_mode);
        if let Some(node) = self.greeting_description {
            let html = self
                .highlighter
                .render_html(&self.content.greeting.description, self.env.accent());
            doc.set_html(node, html);
        }
    }

    pub fn dispatch(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let kind = event.kind();
        let reaction = match kind {
            ControlKind::Timeline => self.on_timeline_expand(doc, event),
            ControlKind::Tile | ControlKind::Contact => self.on_card_expand(doc, event),
            ControlKind::Navigation => self.on_navigation(doc, event),
            ControlKind::Keyboard => self.on_keyboard(doc, event),
            ControlKind::Pointer => self.on_pointer(doc, event),
            ControlKind::Animation => self.on_animation(doc, event),
        };
        debug!(?kind, ?event, handled = reaction.handled, "Dispatched control event");
        reaction
    }

    fn on_timeline_expand(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let ControlEvent::TimelineExpand { control, checked } = event else {
            return Reaction::ignored();
        };
        let Some(slide) = self.pager.as_ref().and_then(|p| p.slide_of_control(control)) else {
            return Reaction::ignored();
        };
        let Some(entry) = self.content.intro.timeline.get(slide) else {
            return Reaction::ignored();
        };
        match self.modal.as_mut() {
            Some(modal) => {
                modal.on_expand_toggled(doc, entry, control, slide, checked);
            }
            None => {
                set_expand_state(doc, control, false, Transition::Instant);
            }
        }
        with_animation(doc, control)
    }

    fn on_card_expand(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let (control, checked, card) = match event {
            ControlEvent::TileExpand { control, checked } => {
                let card = self
                    .tiles
                    .iter()
                    .find(|tile| tile.expand == Some(control))
                    .map(|tile| tile.card);
                (control, checked, card)
            }
            ControlEvent::ContactExpand { control, checked } => {
                let card = self
                    .contacts
                    .iter()
                    .find(|contact| contact.expand == control)
                    .map(|contact| contact.card);
                (control, checked, card)
            }
            _ => return Reaction::ignored(),
        };
        let Some(card) = card else {
            return Reaction::ignored();
        };
        if !set_expand_state(doc, control, checked, Transition::Animated) {
            return Reaction::ignored();
        }
        doc.toggle_class(card, "is-expanded", checked);
        with_animation(doc, control)
    }

    fn on_navigation(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let Some(pager) = self.pager.as_mut() else {
            return Reaction::ignored();
        };
        let modal = self.modal.as_mut();
        match event {
            ControlEvent::SelectSlide(index) => {
                let index = isize::try_from(index).unwrap_or(isize::MAX);
                pager.set_active_slide(doc, modal, index, true, ScrollBehavior::Smooth);
            }
            ControlEvent::PreviousSlide => pager.step(doc, modal, -1, false),
            ControlEvent::NextSlide => pager.step(doc, modal, 1, false),
            _ => return Reaction::ignored(),
        }
        Reaction::handled()
    }

    fn on_keyboard(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        match event {
            ControlEvent::Key(key) => match self.pager.as_mut() {
                Some(pager) => {
                    pager.handle_key(doc, self.modal.as_mut(), key);
                    Reaction::handled()
                }
                None => Reaction::ignored(),
            },
            ControlEvent::Escape => {
                let closed = self
                    .modal
                    .as_mut()
                    .is_some_and(|modal| modal.handle_escape(doc));
                if closed { Reaction::handled() } else { Reaction::ignored() }
            }
            _ => Reaction::ignored(),
        }
    }

    fn on_pointer(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let ControlEvent::Click(target) = event else {
            return Reaction::ignored();
        };
        let closed = self
            .modal
            .as_mut()
            .is_some_and(|modal| modal.handle_click(doc, target));
        if closed { Reaction::handled() } else { Reaction::ignored() }
    }

    fn on_animation(&mut self, doc: &mut Document, event: ControlEvent) -> Reaction {
        let ControlEvent::AnimationSettled(ticket) = event else {
            return Reaction::ignored();
        };
        if settle_animation(doc, ticket) {
            Reaction::handled()
        } else {
            Reaction::ignored()
        }
    }
}

fn with_animation(doc: &Document, control: NodeId) -> Reaction {
    let mut reaction = Reaction::handled();
    reaction.animating.extend(current_animation(doc, control));
    reaction
}

/// Replace the previously rendered region of `container`.
fn fresh_region(doc: &mut Document, container: NodeId, class: &str) -> NodeId {
    let stale: Vec<NodeId> = doc
        .get(container)
        .map(|el| {
            el.children()
                .iter()
                .copied()
                .filter(|child| {
                    doc.get(*child)
                        .is_some_and(|c| c.is_attached() && c.has_class(class))
                })
                .collect()
        })
        .unwrap_or_default();
    for node in stale {
        doc.detach(node);
    }
    let region = doc.create_element("div", container);
    doc.add_class(region, class);
    region
}

fn text_element(doc: &mut Document, tag: &str, parent: NodeId, class: &str, text: &str) -> NodeId {
    let node = doc.create_element(tag, parent);
    doc.add_class(node, class);
    doc.set_text(node, text);
    node
}

fn expand_control(doc: &mut Document, parent: NodeId, class: &str, label: &str) -> NodeId {
    let control = doc.create_element("input", parent);
    doc.add_class(control, class);
    doc.set_attribute(control, "type", "checkbox");
    doc.set_attribute(control, "aria-expanded", "false");
    doc.set_attribute(control, "aria-label", label);
    control
}

fn render_greeting(
    doc: &mut Document,
    content: &Content,
    highlighter: &Highlighter,
    accent: &str,
) -> Option<NodeId> {
    let container = doc.find_by_id(GREETING_ID)?;
    let greeting = &content.greeting;
    let region = fresh_region(doc, container, "greeting-body");
    text_element(doc, "h1", region, "greeting-heading", &greeting.heading);
    let description = doc.create_element("p", region);
    doc.add_class(description, "greeting-description");
    doc.set_html(description, highlighter.render_html(&greeting.description, accent));
    Some(description)
}

fn render_intro(doc: &mut Document, content: &Content) {
    let Some(container) = doc.find_by_id(INTRO_ID) else {
        return;
    };
    let region = fresh_region(doc, container, "intro-body");
    text_element(doc, "h2", region, "intro-heading", &content.intro.heading);
    text_element(doc, "p", region, "intro-description", &content.intro.description);
}

fn render_skills(doc: &mut Document, content: &Content) {
    let Some(container) = doc.find_by_id(SKILLS_ID) else {
        return;
    };
    let region = fresh_region(doc, container, "skills-body");
    text_element(doc, "p", region, "skills-description", &content.skills.description);
    let list = doc.create_element("ul", region);
    doc.add_class(list, "skills-list");
    for skill in content.skills.list.iter().filter(|s| !s.trim().is_empty()) {
        text_element(doc, "li", list, "skill", skill.trim());
    }
}

fn render_projects(
    doc: &mut Document,
    content: &Content,
    template: &dyn TileTemplate,
) -> Vec<TileNodes> {
    let Some(container) = doc.find_by_id(PROJECTS_ID) else {
        return Vec::new();
    };
    let region = fresh_region(doc, container, "project-grid");
    let groups = [
        (TileGroup::Pro, "pro", &content.projects.pro),
        (TileGroup::Hobby, "hobby", &content.projects.hobby),
    ];

    let mut tiles = Vec::new();
    let mut palette_index = 0;
    for (group, label, projects) in groups {
        if projects.is_empty() {
            continue;
        }
        let group_node = doc.create_element("div", region);
        doc.add_class(group_node, "project-group");
        doc.add_class(group_node, &format!("project-group--{label}"));

        let mut remaining: &[Project] = projects;
        for (row_index, row_len) in plan_rows(projects.len()).into_iter().enumerate() {
            let (row_projects, rest) = remaining.split_at(row_len);
            remaining = rest;
            let row = doc.create_element("div", group_node);
            doc.add_class(row, "tile-row");
            let wide_row = row_len == 3;
            if wide_row {
                doc.add_class(row, "tile-row--triple");
            }
            for project in row_projects {
                let colors = resolve_colors(&content.projects, project, palette_index);
                palette_index += 1;

                let card = doc.create_element("article", row);
                doc.add_class(card, CARD_CLASS);
                doc.add_class(card, "tile");
                doc.set_style_var(card, PRIMARY_VAR, &colors.primary);
                doc.set_style_var(card, SECONDARY_VAR, &colors.secondary);
                let extra = project.details().map(details_markup);
                doc.set_html(
                    card,
                    template.render(project, &colors.primary, &colors.secondary, extra.as_deref()),
                );
                let expand = project.details().map(|_| {
                    expand_control(
                        doc,
                        card,
                        "tile-expand",
                        &format!("Show details for {}", project.name.trim()),
                    )
                });
                tiles.push(TileNodes {
                    card,
                    expand,
                    name: project.name.clone(),
                    group,
                    row: row_index,
                    wide_row,
                });
            }
        }
    }
    tiles
}

fn render_socials(doc: &mut Document, content: &Content) -> Vec<ContactNodes> {
    let Some(container) = doc.find_by_id(SOCIALS_ID) else {
        return Vec::new();
    };
    let region = fresh_region(doc, container, "contact-list");
    let mut contacts = Vec::new();
    for social in &content.socials {
        let card = doc.create_element("article", region);
        doc.add_class(card, CARD_CLASS);
        doc.add_class(card, "contact-card");
        let mut html = format!(
            r#"<span class="contact-platform">{}</span><span class="contact-username">{}</span>"#,
            escape_html(&social.platform),
            escape_html(&social.username)
        );
        if let Some(url) = social.url.as_deref().filter(|url| !url.trim().is_empty()) {
            html.push_str(&format!(
                r#"<a class="contact-link" href="{}" rel="noopener">Open</a>"#,
                escape_html(url)
            ));
        }
        doc.set_html(card, html);
        let expand = expand_control(
            doc,
            card,
            "contact-expand",
            &format!("Show {} contact", social.platform.trim()),
        );
        contacts.push(ContactNodes { card, expand });
    }
    contacts
}

fn render_timeline(doc: &mut Document, content: &Content) -> Option<TimelinePager> {
    let container = doc.find_by_id(TIMELINE_ID)?;
    doc.add_class(container, TIMELINE_CLASS);
    let region = fresh_region(doc, container, "timeline-track");

    let mut slides = Vec::with_capacity(content.intro.timeline.len());
    let mut cards = Vec::with_capacity(content.intro.timeline.len());
    for (index, entry) in content.intro.timeline.iter().enumerate() {
        let slide = doc.create_with_id("article", &format!("timeline-slide-{index}"), region);
        doc.add_class(slide, "timeline-slide");
        doc.set_attribute(slide, "role", "tabpanel");

        let card = doc.create_element("div", slide);
        doc.add_class(card, CARD_CLASS);
        doc.add_class(card, "timeline-card");
        let mut html = String::new();
        if let Some(image) = entry.image.as_deref().filter(|src| !src.trim().is_empty()) {
            html.push_str(&format!(
                r#"<img class="timeline-image" src="{}" alt="">"#,
                escape_html(image)
            ));
        }
        html.push_str(&format!(
            r#"<h3 class="timeline-title">{}</h3><p class="timeline-subtitle">{}</p><time class="timeline-date">{}</time>"#,
            escape_html(&entry.title),
            escape_html(&entry.subtitle),
            escape_html(&entry.date)
        ));
        doc.set_html(card, html);

        let expand = expand_control(
            doc,
            card,
            "timeline-expand",
            &format!("Read more about {}", entry.title.trim()),
        );
        doc.set_attribute(expand, "aria-controls", MODAL_ID);
        if !entry.has_details() {
            doc.set_flag(expand, "disabled", true);
            doc.set_attribute(expand, "aria-disabled", "true");
        }
        cards.push((slide, card, expand));
    }

    let nav = doc.create_element("div", region);
    doc.add_class(nav, "timeline-nav");
    doc.set_attribute(nav, "role", "tablist");
    let prev = doc.create_element("button", nav);
    doc.add_class(prev, "timeline-prev");
    doc.set_attribute(prev, "aria-label", "Previous");
    for (index, (entry, (slide, card, expand))) in
        content.intro.timeline.iter().zip(cards).enumerate()
    {
        let label = if entry.date.trim().is_empty() {
            entry.title.trim()
        } else {
            entry.date.trim()
        };
        let trigger = text_element(doc, "button", nav, "timeline-trigger", label);
        doc.set_attribute(trigger, "role", "tab");
        doc.set_attribute(trigger, "aria-controls", &format!("timeline-slide-{index}"));
        slides.push(SlideNodes {
            slide,
            trigger,
            card,
            expand,
        });
    }
    let next = doc.create_element("button", nav);
    doc.add_class(next, "timeline-next");
    doc.set_attribute(next, "aria-label", "Next");

    Some(TimelinePager::new(container, slides, Some(prev), Some(next)))
}
