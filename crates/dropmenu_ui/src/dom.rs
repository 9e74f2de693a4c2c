//! Headless node model standing in for the DOM.
//!
//! Menu items own their `Element`; the menu's boxes are `Container`s that only
//! hold the ordered IDs of the nodes appended to them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Class carried by the menu's content box.
pub const CSS_DROPDOWN_MENU: &str = "dropdown-menu";
/// Class carried by the bounding box while the menu is inline.
pub const CSS_MENU_INLINE: &str = "menu-inline";
/// Class carried by every menu item node.
pub const CSS_MENU_ITEM: &str = "menu-item";
/// Class carried by the bounding box.
pub const CSS_MENU: &str = "menu";

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh node ID.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Set of CSS class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassList(BTreeSet<String>);

impl ClassList {
    /// Add a class.
    pub fn add(&mut self, class: &str) {
        self.0.insert(class.to_string());
    }

    /// Remove a class.
    pub fn remove(&mut self, class: &str) {
        self.0.remove(class);
    }

    /// Add or remove a class depending on `on`.
    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    /// Check if the class is present.
    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    /// Iterate class names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A markup element.
///
/// Elements deserialize from JSON so menus can be built from markup documents:
/// `{"tag": "li", "classes": ["menu-item"], "text": "Open"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(skip, default = "NodeId::next")]
    id: NodeId,
    /// Tag name.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// CSS classes.
    #[serde(default)]
    pub classes: ClassList,
    /// Text content.
    #[serde(default)]
    pub text: String,
    /// Attributes such as `data-shortcut`.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Child elements.
    #[serde(default)]
    pub children: Vec<Element>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            tag: tag.into(),
            classes: ClassList::default(),
            text: String::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// This element's node ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Builder: add a class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.add(class);
        self
    }

    /// Builder: set text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Check for a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Remove and return the direct children carrying `class`, in order.
    ///
    /// Other children are left in place.
    pub fn take_children_with_class(&mut self, class: &str) -> Vec<Element> {
        let (matched, rest): (Vec<Element>, Vec<Element>) =
            std::mem::take(&mut self.children).into_iter().partition(|c| c.has_class(class));
        self.children = rest;
        matched
    }
}

/// A box whose children are nodes owned elsewhere.
#[derive(Debug, Clone)]
pub struct Container {
    id: NodeId,
    /// CSS classes.
    pub classes: ClassList,
    children: Vec<NodeId>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self { id: NodeId::next(), classes: ClassList::default(), children: Vec::new() }
    }

    /// Adopt the identity and classes of an existing element.
    pub fn from_element(element: &Element) -> Self {
        Self { id: element.id(), classes: element.classes.clone(), children: Vec::new() }
    }

    /// This container's node ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Detach every child.
    pub fn empty(&mut self) {
        self.children.clear();
    }

    /// Append a child node.
    pub fn append(&mut self, node: NodeId) {
        self.children.push(node);
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if `node` is a direct child.
    pub fn contains(&self, node: NodeId) -> bool {
        self.children.contains(&node)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_toggle() {
        let mut classes = ClassList::default();
        classes.toggle(CSS_MENU_INLINE, true);
        assert!(classes.contains(CSS_MENU_INLINE));
        classes.toggle(CSS_MENU_INLINE, false);
        assert!(!classes.contains(CSS_MENU_INLINE));
    }

    #[test]
    fn test_element_from_json_gets_fresh_ids() {
        let json = r#"{"tag": "ul", "children": [
            {"tag": "li", "classes": ["menu-item"], "text": "Open"},
            {"tag": "li", "text": "stray"}
        ]}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.children.len(), 2);
        assert_ne!(element.id(), element.children[0].id());
        assert!(element.children[0].has_class(CSS_MENU_ITEM));
    }

    #[test]
    fn test_take_children_with_class() {
        let mut root = Element::new("ul")
            .child(Element::new("li").class(CSS_MENU_ITEM).text("A"))
            .child(Element::new("span"))
            .child(Element::new("li").class(CSS_MENU_ITEM).text("B"));

        let items = root.take_children_with_class(CSS_MENU_ITEM);
        let labels: Vec<_> = items.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_container_children() {
        let mut container = Container::new();
        let a = NodeId::next();
        let b = NodeId::next();
        container.append(a);
        container.append(b);
        assert_eq!(container.children(), [a, b]);
        assert!(container.contains(b));
        container.empty();
        assert!(container.children().is_empty());
    }
}
