//! Plain descriptors for menu items.

use serde::{Deserialize, Serialize};

/// Configuration for a single menu item.
///
/// Descriptors are what the menu's `items` configuration holds; the menu turns
/// each one into an owned menu item when the items are assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDescriptor {
    /// Display label.
    pub label: String,
    /// Keyboard shortcut, e.g. `"Ctrl+C"`.
    pub shortcut: Option<String>,
    /// Disabled items are shown but cannot be selected.
    pub disabled: bool,
    /// Dividers are visual separators and never selectable.
    pub divider: bool,
    /// Entries of this item's submenu.
    pub submenu: Vec<ItemDescriptor>,
}

impl ItemDescriptor {
    /// Create a plain item with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Default::default() }
    }

    /// Create a divider.
    pub fn divider() -> Self {
        Self { divider: true, ..Default::default() }
    }

    /// Builder: add a keyboard shortcut.
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Builder: set disabled state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: attach submenu entries.
    pub fn submenu(mut self, entries: Vec<ItemDescriptor>) -> Self {
        self.submenu = entries;
        self
    }

    /// Check if this item can produce a selection.
    pub fn is_selectable(&self) -> bool {
        !self.divider && !self.disabled
    }

    /// Check if this item has a submenu.
    pub fn has_submenu(&self) -> bool {
        !self.submenu.is_empty()
    }
}
