//! Selection dispatch: clicks, shortcuts and nested submenu selections all end
//! up as one preventable "item selected" event.

use dropmenu_core::{ItemId, SelectionSource};

use crate::menu::Menu;
use crate::menu_item::ItemEvent;

/// Fired when one of the menu's items is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelectedEvent {
    item: ItemId,
    label: String,
    src: SelectionSource,
    parent: Option<ItemId>,
    default_prevented: bool,
}

impl ItemSelectedEvent {
    fn new(item: ItemId, label: &str, src: SelectionSource, parent: Option<ItemId>) -> Self {
        Self { item, label: label.to_string(), src, parent, default_prevented: false }
    }

    /// The selected item, or the nested submenu entry.
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Label of the selected item.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// What triggered the selection.
    pub fn src(&self) -> SelectionSource {
        self.src
    }

    /// The top-level item owning a nested submenu entry.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Skip the default reaction (collapsing overlay submenus).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if a listener prevented the default reaction.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle returned by `Menu::on_item_selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener for item selection.
pub type ItemSelectedListener = Box<dyn FnMut(&mut ItemSelectedEvent) + Send + 'static>;

impl Menu {
    /// Subscribe to item selection. Listeners run in registration order.
    pub fn on_item_selected(
        &mut self,
        listener: impl FnMut(&mut ItemSelectedEvent) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Route an event emitted by one of the menu's items.
    ///
    /// Events from items that no longer target this menu are dropped.
    pub fn handle_item_event(&mut self, event: ItemEvent) -> Option<ItemSelectedEvent> {
        if self.destroyed {
            return None;
        }
        let item = self.item(event.item())?;
        if !item.is_targeting(self.id) {
            tracing::debug!(menu = %self.id, item = %event.item(), "Dropping event from detached item");
            return None;
        }

        match event {
            ItemEvent::Shortcut { item } => self.select_item(item, SelectionSource::Shortcut),
            ItemEvent::SubmenuItemSelected { item, entry, src } => {
                self.after_submenu_item_selected(item, entry, src)
            }
        }
    }

    /// Deliver a key combination to the first item whose shortcut matches.
    ///
    /// Top-level items win over submenu entries with the same shortcut.
    pub fn handle_key_combo(&mut self, combo: &str) -> Option<ItemSelectedEvent> {
        let event = self
            .items
            .iter()
            .find_map(|item| item.fire_shortcut(combo))
            .or_else(|| self.items.iter().find_map(|item| item.fire_entry_shortcut(combo)))?;
        self.handle_item_event(event)
    }

    /// An entry of an item's submenu was selected.
    pub fn select_submenu_entry(
        &mut self,
        item: ItemId,
        entry: ItemId,
        src: SelectionSource,
    ) -> Option<ItemSelectedEvent> {
        let event = self.item(item)?.fire_submenu_selection(entry, src)?;
        self.handle_item_event(event)
    }

    fn after_submenu_item_selected(
        &mut self,
        parent: ItemId,
        entry: ItemId,
        src: SelectionSource,
    ) -> Option<ItemSelectedEvent> {
        let entry = self.item(parent)?.submenu_entry(entry)?;
        if !entry.is_selectable() {
            return None;
        }
        let event = ItemSelectedEvent::new(entry.id(), entry.label(), src, Some(parent));
        Some(self.fire_item_selected(event))
    }

    /// Fires the selection event for an item, unless it's not selectable.
    pub(crate) fn select_item(&mut self, id: ItemId, src: SelectionSource) -> Option<ItemSelectedEvent> {
        let item = self.item(id)?;
        if !item.is_selectable() {
            tracing::trace!(menu = %self.id, item = %id, "Ignoring non-selectable item");
            return None;
        }
        let event = ItemSelectedEvent::new(id, item.label(), src, None);
        Some(self.fire_item_selected(event))
    }

    fn fire_item_selected(&mut self, mut event: ItemSelectedEvent) -> ItemSelectedEvent {
        tracing::debug!(menu = %self.id, item = %event.item, label = %event.label, src = %event.src, "Item selected");

        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&mut event);
        }
        self.listeners = listeners;

        if !event.default_prevented {
            self.def_item_selected();
        }
        event
    }

    /// Default reaction to a selection: collapse the overlay menu tree.
    fn def_item_selected(&mut self) {
        if self.layout_mode.is_overlay() {
            self.hide_all_submenus();
        }
    }
}
