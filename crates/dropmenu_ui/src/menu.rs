//! Dropdown menu component.
//!
//! This module provides:
//! - Menu construction from configuration or markup
//! - The item registry and content box rendering
//! - Lifecycle: render, sync and destroy
//!
//! Layout switching, submenu coordination and selection dispatch live in
//! `layout`, `submenu` and `selection` as further `impl Menu` blocks.

use dropmenu_core::{parse_items, ItemDescriptor, ItemId, LayoutMode, MenuConfig, MenuError, MenuId};
use serde_json::Value;

use crate::debounce::Debouncer;
use crate::dom::{Container, Element, NodeId, CSS_DROPDOWN_MENU, CSS_MENU, CSS_MENU_ITEM};
use crate::menu_item::MenuItem;
use crate::position::{Position, Stack};
use crate::selection::{ItemSelectedListener, ListenerId};

// ============================================================================
// Items
// ============================================================================

/// One entry of an `items` assignment.
#[derive(Debug)]
pub enum ItemSpec {
    /// Build a new item from a descriptor.
    Descriptor(ItemDescriptor),
    /// Take ownership of an existing item.
    Item(MenuItem),
}

impl From<ItemDescriptor> for ItemSpec {
    fn from(descriptor: ItemDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<MenuItem> for ItemSpec {
    fn from(item: MenuItem) -> Self {
        Self::Item(item)
    }
}

/// Value accepted by `Menu::set_items`.
#[derive(Debug)]
pub enum ItemsSource {
    /// Existing elements tagged as menu items.
    Nodes(Vec<Element>),
    /// Descriptors and/or pre-built items.
    Specs(Vec<ItemSpec>),
}

impl From<Vec<ItemDescriptor>> for ItemsSource {
    fn from(descriptors: Vec<ItemDescriptor>) -> Self {
        Self::Specs(descriptors.into_iter().map(ItemSpec::from).collect())
    }
}

impl From<Vec<MenuItem>> for ItemsSource {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::Specs(items.into_iter().map(ItemSpec::from).collect())
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A dropdown menu that switches between inline and overlay layouts.
pub struct Menu {
    pub(crate) id: MenuId,
    pub(crate) items: Vec<MenuItem>,
    pub(crate) layout_mode: LayoutMode,
    /// Item whose submenu is open. Owned by `items`.
    pub(crate) open_submenu_item: Option<ItemId>,
    pub(crate) bounding_box: Container,
    pub(crate) content_box: Container,
    pub(crate) position: Position,
    pub(crate) stack: Stack,
    pub(crate) hover: Debouncer<ItemId>,
    pub(crate) listeners: Vec<(ListenerId, ItemSelectedListener)>,
    pub(crate) next_listener_id: u64,
    rendered: bool,
    pub(crate) destroyed: bool,
}

impl Menu {
    /// Create a menu from configuration.
    pub fn new(config: MenuConfig) -> Self {
        let mut bounding_box = Container::new();
        bounding_box.classes.add(CSS_MENU);
        let mut menu = Self::with_boxes(&config, bounding_box, Container::new());
        menu.items = menu.resolve_items(ItemsSource::from(config.items));
        menu
    }

    /// Build a menu from existing markup.
    ///
    /// `root` becomes the content box. Its direct children carrying the
    /// `menu-item` class become the items; other children are discarded.
    pub fn from_markup(mut root: Element, config: MenuConfig) -> Self {
        let nodes = root.take_children_with_class(CSS_MENU_ITEM);
        let mut bounding_box = Container::new();
        bounding_box.classes.add(CSS_MENU);
        let content_box = Container::from_element(&root);

        let mut menu = Self::with_boxes(&config, bounding_box, content_box);
        menu.items = menu.resolve_items(ItemsSource::Nodes(nodes));
        tracing::debug!(menu = %menu.id, items = menu.items.len(), "Menu built from markup");
        menu
    }

    fn with_boxes(config: &MenuConfig, bounding_box: Container, content_box: Container) -> Self {
        Self {
            id: MenuId::new(),
            items: Vec::new(),
            layout_mode: LayoutMode::default(),
            open_submenu_item: None,
            bounding_box,
            content_box,
            position: Position::default(),
            stack: Stack::new(config.z_index),
            hover: Debouncer::new(config.hover_delay()),
            listeners: Vec::new(),
            next_listener_id: 0,
            rendered: false,
            destroyed: false,
        }
    }

    /// Menu ID; items send their events to it.
    pub fn id(&self) -> MenuId {
        self.id
    }

    // ========== Lifecycle ==========

    /// Render the items into the content box, then sync the layout mode.
    pub fn render(&mut self, viewport_width: u32) {
        if self.destroyed {
            tracing::debug!(menu = %self.id, "Ignoring render of destroyed menu");
            return;
        }
        self.ui_set_items();
        self.content_box.classes.add(CSS_DROPDOWN_MENU);
        self.rendered = true;
        self.sync_ui(viewport_width);
    }

    /// Whether `render` has run.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Destroy every owned item and release all subscriptions.
    ///
    /// Returns the IDs of the items destroyed by this call. Calling it again
    /// does nothing.
    pub fn destroy(&mut self) -> Vec<ItemId> {
        if self.destroyed {
            return Vec::new();
        }

        let destroyed: Vec<ItemId> =
            self.items.iter_mut().filter_map(|item| item.destroy().then(|| item.id())).collect();

        self.hover.cancel();
        self.open_submenu_item = None;
        let released = self.listeners.len();
        self.listeners.clear();
        self.destroyed = true;

        tracing::debug!(menu = %self.id, items = destroyed.len(), released, "Menu destroyed");
        destroyed
    }

    /// Check if the menu was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of registered selection listeners.
    pub fn active_subscriptions(&self) -> usize {
        self.listeners.len()
    }

    // ========== Item Registry ==========

    /// Items in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Find an owned item by ID.
    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Returns the item bound to the given node.
    pub fn get_menu_item_from_node(&self, node: NodeId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.node().id() == node)
    }

    /// The box holding the item nodes.
    pub fn content_box(&self) -> &Container {
        &self.content_box
    }

    /// The outer box.
    pub fn bounding_box(&self) -> &Container {
        &self.bounding_box
    }

    /// Replace the items.
    ///
    /// The menu stops being the event target of the previous items, which are
    /// handed back to the caller, and the content box is re-rendered.
    pub fn set_items(&mut self, source: impl Into<ItemsSource>) -> Result<Vec<MenuItem>, MenuError> {
        if self.destroyed {
            return Err(MenuError::Destroyed);
        }

        let source = source.into();
        validate(&source)?;

        let items = self.resolve_items(source);
        let previous = std::mem::replace(&mut self.items, items);
        Ok(self.after_items_change(previous))
    }

    /// Replace the items from an untyped value.
    ///
    /// Anything other than an array of descriptor objects is rejected and
    /// the current items stay in place.
    pub fn set_items_from_value(&mut self, value: &Value) -> Result<Vec<MenuItem>, MenuError> {
        let descriptors = parse_items(value).inspect_err(|e| {
            tracing::warn!(menu = %self.id, error = %e, "Rejected items assignment");
        })?;
        self.set_items(descriptors)
    }

    fn resolve_items(&self, source: ItemsSource) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = match source {
            ItemsSource::Nodes(nodes) => nodes.into_iter().map(MenuItem::from_element).collect(),
            ItemsSource::Specs(specs) => specs
                .into_iter()
                .map(|spec| match spec {
                    ItemSpec::Descriptor(descriptor) => MenuItem::new(descriptor),
                    ItemSpec::Item(item) => item,
                })
                .collect(),
        };

        for item in &mut items {
            item.add_target(self.id);
        }
        items
    }

    fn after_items_change(&mut self, mut previous: Vec<MenuItem>) -> Vec<MenuItem> {
        for item in &mut previous {
            item.remove_target(self.id);
            item.hide_submenu();
        }

        // Adopted items may arrive with their submenus showing. Only the
        // recorded item may stay open.
        let keep = self
            .open_submenu_item
            .filter(|id| self.item(*id).is_some_and(MenuItem::is_submenu_open));
        for item in self.items.iter_mut().filter(|item| Some(item.id()) != keep) {
            item.hide_submenu();
        }
        self.open_submenu_item = keep;
        if self.hover.pending().is_some_and(|id| self.item(*id).is_none()) {
            self.hover.cancel();
        }

        self.ui_set_items();
        tracing::debug!(
            menu = %self.id,
            previous = previous.len(),
            current = self.items.len(),
            "Menu items changed"
        );
        previous
    }

    /// Empty the content box and append each item's node in order.
    fn ui_set_items(&mut self) {
        self.content_box.empty();
        for item in &self.items {
            self.content_box.append(item.node().id());
        }
    }

    /// Resolve a node to an item the way delegated DOM events do: only direct
    /// children of the content box carrying `menu-item` count.
    pub(crate) fn delegate_target(&self, node: NodeId) -> Option<ItemId> {
        if !self.content_box.contains(node) {
            return None;
        }
        self.get_menu_item_from_node(node)
            .filter(|item| item.node().has_class(CSS_MENU_ITEM))
            .map(MenuItem::id)
    }
}

fn validate(source: &ItemsSource) -> Result<(), MenuError> {
    match source {
        ItemsSource::Nodes(nodes) => {
            if let Some(index) = nodes.iter().position(|n| !n.has_class(CSS_MENU_ITEM)) {
                return Err(MenuError::invalid_items(format!(
                    "node {index} is not tagged with `{CSS_MENU_ITEM}`"
                )));
            }
        }
        ItemsSource::Specs(specs) => {
            let destroyed = specs.iter().position(|spec| match spec {
                ItemSpec::Item(item) => item.is_destroyed(),
                ItemSpec::Descriptor(_) => false,
            });
            if let Some(index) = destroyed {
                return Err(MenuError::invalid_items(format!("item {index} was destroyed")));
            }
        }
    }
    Ok(())
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("items", &self.items.len())
            .field("layout_mode", &self.layout_mode)
            .field("open_submenu_item", &self.open_submenu_item)
            .field("listeners", &self.listeners.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
