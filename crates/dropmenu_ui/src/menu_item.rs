//! Menu item widget: node binding, submenu visibility, shortcuts and
//! event-target bookkeeping.

use dropmenu_core::{ItemDescriptor, ItemId, MenuId, SelectionSource};
use smallvec::SmallVec;

use crate::dom::{Element, CSS_DROPDOWN_MENU, CSS_MENU_ITEM};

const CSS_ITEM_DISABLED: &str = "menu-item-disabled";
const CSS_ITEM_DIVIDER: &str = "menu-item-divider";
const CSS_ITEM_OPEN: &str = "menu-item-open";
const ATTR_SHORTCUT: &str = "data-shortcut";

// ============================================================================
// ItemEvent
// ============================================================================

/// Events a menu item emits towards its event targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    /// The item's keyboard shortcut was pressed.
    Shortcut { item: ItemId },
    /// An entry of the item's submenu was selected.
    SubmenuItemSelected { item: ItemId, entry: ItemId, src: SelectionSource },
}

impl ItemEvent {
    /// The item that emitted this event.
    pub fn item(&self) -> ItemId {
        match self {
            Self::Shortcut { item } | Self::SubmenuItemSelected { item, .. } => *item,
        }
    }
}

// ============================================================================
// SubmenuEntry
// ============================================================================

/// An entry in a menu item's submenu.
#[derive(Debug, Clone)]
pub struct SubmenuEntry {
    id: ItemId,
    descriptor: ItemDescriptor,
}

impl SubmenuEntry {
    fn new(descriptor: ItemDescriptor) -> Self {
        Self { id: ItemId::new(), descriptor }
    }

    /// Entry ID.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.descriptor.label
    }

    /// Check if this entry can produce a selection.
    pub fn is_selectable(&self) -> bool {
        self.descriptor.is_selectable()
    }

    /// Check if a key combination matches this entry's shortcut.
    pub fn matches_shortcut(&self, combo: &str) -> bool {
        shortcut_matches(self.descriptor.shortcut.as_deref(), combo)
    }
}

/// How an open submenu was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmenuState {
    /// Whether the submenu is absolutely positioned.
    pub as_overlay: bool,
    /// Stacking order the submenu was shown at.
    pub z_index: i32,
}

// ============================================================================
// MenuItem
// ============================================================================

/// A single entry of a menu.
#[derive(Debug)]
pub struct MenuItem {
    id: ItemId,
    descriptor: ItemDescriptor,
    node: Element,
    submenu: Vec<SubmenuEntry>,
    submenu_state: Option<SubmenuState>,
    targets: SmallVec<[MenuId; 1]>,
    destroyed: bool,
}

impl MenuItem {
    /// Create an item and its node from a descriptor.
    pub fn new(descriptor: ItemDescriptor) -> Self {
        let node = render_node(&descriptor);
        Self::with_node(descriptor, node)
    }

    /// Resolve an existing element tagged as a menu item.
    ///
    /// The element keeps its node ID, so lookups by node keep working.
    pub fn from_element(element: Element) -> Self {
        let descriptor = descriptor_from_element(&element);
        let mut node = element;
        node.classes.add(CSS_MENU_ITEM);
        Self::with_node(descriptor, node)
    }

    fn with_node(descriptor: ItemDescriptor, node: Element) -> Self {
        let submenu = descriptor.submenu.iter().cloned().map(SubmenuEntry::new).collect();
        Self {
            id: ItemId::new(),
            descriptor,
            node,
            submenu,
            submenu_state: None,
            targets: SmallVec::new(),
            destroyed: false,
        }
    }

    /// Item ID.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.descriptor.label
    }

    /// The descriptor this item was built from.
    pub fn descriptor(&self) -> &ItemDescriptor {
        &self.descriptor
    }

    /// The node bound to this item.
    pub fn node(&self) -> &Element {
        &self.node
    }

    /// Check if this item can produce a selection.
    pub fn is_selectable(&self) -> bool {
        !self.destroyed && self.descriptor.is_selectable()
    }

    /// Check if this item has submenu entries.
    pub fn has_submenu(&self) -> bool {
        !self.submenu.is_empty()
    }

    /// Submenu entries.
    pub fn submenu_entries(&self) -> &[SubmenuEntry] {
        &self.submenu
    }

    /// Find a submenu entry by ID.
    pub fn submenu_entry(&self, id: ItemId) -> Option<&SubmenuEntry> {
        self.submenu.iter().find(|e| e.id == id)
    }

    // ========== Submenu Visibility ==========

    /// Check if the submenu is showing.
    pub fn is_submenu_open(&self) -> bool {
        self.submenu_state.is_some()
    }

    /// How the submenu is currently shown, if it is.
    pub fn submenu_state(&self) -> Option<SubmenuState> {
        self.submenu_state
    }

    /// Show the submenu. Items without a submenu ignore this.
    pub fn show_submenu(&mut self, as_overlay: bool, z_index: i32) {
        if self.destroyed || !self.has_submenu() {
            return;
        }
        self.submenu_state = Some(SubmenuState { as_overlay, z_index });
        self.node.classes.add(CSS_ITEM_OPEN);
        tracing::trace!(item = %self.id, as_overlay, z_index, "Submenu shown");
    }

    /// Hide the submenu.
    pub fn hide_submenu(&mut self) {
        if self.submenu_state.take().is_some() {
            self.node.classes.remove(CSS_ITEM_OPEN);
            tracing::trace!(item = %self.id, "Submenu hidden");
        }
    }

    // ========== Events ==========

    /// Check if a key combination matches this item's shortcut.
    pub fn matches_shortcut(&self, combo: &str) -> bool {
        shortcut_matches(self.descriptor.shortcut.as_deref(), combo)
    }

    /// Emit a shortcut event if `combo` matches this item's shortcut.
    pub fn fire_shortcut(&self, combo: &str) -> Option<ItemEvent> {
        (!self.destroyed && self.matches_shortcut(combo)).then_some(ItemEvent::Shortcut { item: self.id })
    }

    /// Emit a submenu selection event for the first entry whose shortcut
    /// matches `combo`.
    pub fn fire_entry_shortcut(&self, combo: &str) -> Option<ItemEvent> {
        let entry = self.submenu.iter().find(|entry| entry.matches_shortcut(combo))?;
        self.fire_submenu_selection(entry.id, SelectionSource::Shortcut)
    }

    /// Emit a submenu selection event for one of this item's entries.
    pub fn fire_submenu_selection(&self, entry: ItemId, src: SelectionSource) -> Option<ItemEvent> {
        if self.destroyed || self.submenu_entry(entry).is_none() {
            return None;
        }
        Some(ItemEvent::SubmenuItemSelected { item: self.id, entry, src })
    }

    /// Register a menu as a target for this item's events.
    pub fn add_target(&mut self, menu: MenuId) {
        if !self.targets.contains(&menu) {
            self.targets.push(menu);
        }
    }

    /// Stop sending events to a menu.
    pub fn remove_target(&mut self, menu: MenuId) {
        self.targets.retain(|t| *t != menu);
    }

    /// Check if `menu` receives this item's events.
    pub fn is_targeting(&self, menu: MenuId) -> bool {
        self.targets.contains(&menu)
    }

    // ========== Lifecycle ==========

    /// Destroy the item. Returns false if it was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.hide_submenu();
        self.targets.clear();
        self.destroyed = true;
        tracing::trace!(item = %self.id, "Menu item destroyed");
        true
    }

    /// Check if the item was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl From<ItemDescriptor> for MenuItem {
    fn from(descriptor: ItemDescriptor) -> Self {
        Self::new(descriptor)
    }
}

fn render_node(descriptor: &ItemDescriptor) -> Element {
    let mut node = Element::new("li").class(CSS_MENU_ITEM).text(descriptor.label.clone());
    if descriptor.disabled {
        node.classes.add(CSS_ITEM_DISABLED);
    }
    if descriptor.divider {
        node.classes.add(CSS_ITEM_DIVIDER);
    }
    if let Some(shortcut) = &descriptor.shortcut {
        node = node.attr(ATTR_SHORTCUT, shortcut.clone());
    }
    if descriptor.has_submenu() {
        let list = descriptor
            .submenu
            .iter()
            .fold(Element::new("ul").class(CSS_DROPDOWN_MENU), |list, entry| {
                list.child(render_node(entry))
            });
        node = node.child(list);
    }
    node
}

fn descriptor_from_element(element: &Element) -> ItemDescriptor {
    let submenu = element
        .children
        .iter()
        .filter(|c| c.has_class(CSS_DROPDOWN_MENU))
        .flat_map(|list| list.children.iter().filter(|c| c.has_class(CSS_MENU_ITEM)))
        .map(descriptor_from_element)
        .collect();

    ItemDescriptor {
        label: element.text.trim().to_string(),
        shortcut: element.get_attr(ATTR_SHORTCUT).map(String::from),
        disabled: element.has_class(CSS_ITEM_DISABLED),
        divider: element.has_class(CSS_ITEM_DIVIDER),
        submenu,
    }
}

fn shortcut_matches(own: Option<&str>, combo: &str) -> bool {
    match (own.and_then(normalize_shortcut), normalize_shortcut(combo)) {
        (Some(own), Some(pressed)) => own == pressed,
        _ => false,
    }
}

/// Canonical form of a key combination: lowercase, modifiers sorted, key last.
fn normalize_shortcut(combo: &str) -> Option<String> {
    let mut parts: Vec<String> =
        combo.split('+').map(|p| p.trim().to_lowercase()).filter(|p| !p.is_empty()).collect();
    let key = parts.pop()?;
    parts.sort();
    parts.dedup();
    parts.push(key);
    Some(parts.join("+"))
}
