//! Headless document model the engine renders into.
//!
//! The page shell owns the real markup; the engine only needs a tree of
//! addressable elements carrying attributes, classes, custom properties and
//! opaque inner markup. Nodes are never freed: detaching a subtree marks it
//! as no longer attached so stale handles stay harmless.

use crate::typewriter::Frame;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Document shared between the synchronous components and async loops.
/// Never hold the lock across an await point.
pub type SharedDocument = Arc<Mutex<Document>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    computed_background: Option<String>,
    html: String,
    frame: Option<Frame>,
    checked: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            computed_background: None,
            html: String::new(),
            frame: None,
            checked: false,
            parent,
            children: Vec::new(),
            attached: true,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn style_var(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn computed_background(&self) -> Option<&str> {
        self.computed_background.as_deref()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Markup with tags stripped and entities decoded.
    pub fn text_content(&self) -> String {
        text_of(&self.html)
    }

    /// Last typewriter frame painted here; `html` holds its markup.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_hidden(&self) -> bool {
        self.has_attribute("hidden")
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    focused: Option<NodeId>,
    scroll_locked: bool,
    /// Latest scroll-into-view request not yet taken by the shell.
    pending_scroll: Option<(NodeId, ScrollBehavior)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", None)],
            body: NodeId(0),
            focused: None,
            scroll_locked: false,
            pending_scroll: None,
        }
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str, parent: NodeId) -> NodeId {
        let node = NodeId(self.nodes.len());
        let attached = self.is_attached(parent);
        let mut element = Element::new(tag, Some(parent));
        element.attached = attached;
        self.nodes.push(element);
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(node);
        }
        node
    }

    pub fn create_with_id(&mut self, tag: &str, id: &str, parent: NodeId) -> NodeId {
        let node = self.create_element(tag, parent);
        self.nodes[node.0].id = Some(id.to_string());
        node
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn edit(&mut self, node: NodeId, apply: impl FnOnce(&mut Element)) {
        if let Some(element) = self.nodes.get_mut(node.0) {
            apply(element);
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Element::is_attached)
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|element| element.attached && element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// Attached elements carrying `class`, in creation order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, element)| element.attached && element.has_class(class))
            .map(|(idx, _)| NodeId(idx))
            .collect()
    }

    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |current| {
            self.get(*current).and_then(Element::parent)
        })
    }

    /// Nearest inclusive ancestor with `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.ancestors(node)
            .find(|candidate| self.get(*candidate).is_some_and(|el| el.has_class(class)))
    }

    /// Nearest inclusive ancestor carrying attribute `name`.
    pub fn closest_with_attribute(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.ancestors(node)
            .find(|candidate| self.get(*candidate).is_some_and(|el| el.has_attribute(name)))
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|candidate| candidate == ancestor)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.edit(node, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.edit(node, |el| {
            el.attributes.remove(name);
        });
    }

    /// Presence-style boolean attribute (`hidden`, `disabled`).
    pub fn set_flag(&mut self, node: NodeId, name: &str, present: bool) {
        if present {
            self.set_attribute(node, name, "");
        } else {
            self.remove_attribute(node, name);
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.edit(node, |el| {
            el.classes.insert(class.to_string());
        });
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.edit(node, |el| {
            el.classes.remove(class);
        });
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, present: bool) {
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn set_style_var(&mut self, node: NodeId, name: &str, value: &str) {
        self.edit(node, |el| {
            el.style.insert(name.to_string(), value.to_string());
        });
    }

    pub fn set_computed_background(&mut self, node: NodeId, value: Option<&str>) {
        self.edit(node, |el| el.computed_background = value.map(str::to_string));
    }

    pub fn set_html(&mut self, node: NodeId, html: impl Into<String>) {
        let html = html.into();
        self.edit(node, |el| {
            el.html = html;
            el.frame = None;
        });
    }

    /// Replace content with escaped text.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.set_html(node, escape_html(text));
    }

    pub fn paint_frame(&mut self, node: NodeId, frame: Frame, markup: String) {
        self.edit(node, |el| {
            el.html = markup;
            el.frame = Some(frame);
        });
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        self.edit(node, |el| el.checked = checked);
    }

    /// Detach `node` and its subtree.
    pub fn detach(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.nodes.get_mut(current.0) {
                element.attached = false;
                stack.extend(element.children.iter().copied());
            }
        }
        if self.focused.is_some_and(|focused| !self.is_attached(focused)) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.is_attached(node) {
            self.focused = Some(node);
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
        let body = self.body;
        self.toggle_class(body, "modal-open", locked);
    }

    /// Ask the shell to bring `node` into view. A newer request replaces
    /// one the shell has not taken yet.
    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        self.pending_scroll = Some((node, behavior));
    }

    pub fn pending_scroll(&self) -> Option<(NodeId, ScrollBehavior)> {
        self.pending_scroll
    }

    pub fn take_scroll_request(&mut self) -> Option<(NodeId, ScrollBehavior)> {
        self.pending_scroll.take()
    }
}

/// Escape text for inclusion in markup or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn text_of(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find(['<', '&']) {
        text.push_str(&rest[..start]);
        rest = &rest[start..];
        if rest.starts_with('<') {
            rest = match rest.find('>') {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            continue;
        }
        let decoded = ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity));
        match decoded {
            Some((entity, ch)) => {
                text.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                text.push('&');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    text
}

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_undoes_escaping() {
        let mut doc = Document::new();
        let body = doc.body();
        let node = doc.create_element("p", body);
        doc.set_text(node, "Tom & <Jerry> \"quoted\" it's");
        let el = doc.get(node).expect("node");
        assert_eq!(el.text_content(), "Tom & <Jerry> \"quoted\" it's");

        doc.set_html(node, r#"<span class="x">a</span> &amp; b &nbsp;"#);
        assert_eq!(doc.get(node).expect("node").text_content(), "a & b &nbsp;");
    }

    #[test]
    fn detaching_a_subtree_hides_it_from_queries() {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc.create_with_id("section", "intro", body);
        let card = doc.create_element("div", section);
        doc.add_class(card, "expandable-card");
        doc.focus(card);

        assert_eq!(doc.find_by_id("intro"), Some(section));
        assert_eq!(doc.find_by_class("expandable-card"), vec![card]);

        doc.detach(card);
        assert!(doc.find_by_class("expandable-card").is_empty());
        assert!(!doc.is_attached(card));
        assert_eq!(doc.focused(), None);
        assert_eq!(doc.find_by_id("intro"), Some(section));
    }

    #[test]
    fn closest_queries_include_the_node_itself() {
        let mut doc = Document::new();
        let body = doc.body();
        let modal = doc.create_element("div", body);
        doc.add_class(modal, "modal");
        let button = doc.create_element("button", modal);
        doc.set_attribute(button, "data-modal-close", "");
        let icon = doc.create_element("span", button);

        assert_eq!(doc.closest_with_class(icon, "modal"), Some(modal));
        assert_eq!(doc.closest_with_attribute(icon, "data-modal-close"), Some(button));
        assert_eq!(doc.closest_with_attribute(button, "data-modal-close"), Some(button));
        assert!(doc.contains(modal, icon));
        assert!(!doc.contains(icon, modal));
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b a="x">Tom & 'Jerry'</b>"#),
            "&lt;b a=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
