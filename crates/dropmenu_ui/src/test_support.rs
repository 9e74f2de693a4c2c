//! Shared fixtures for unit tests.

use std::sync::Arc;

use dropmenu_core::{ItemDescriptor, MenuConfig};
use parking_lot::Mutex;

use crate::dom::NodeId;
use crate::menu::Menu;
use crate::selection::ItemSelectedEvent;

pub(crate) const OVERLAY_WIDTH: u32 = 1024;
pub(crate) const INLINE_WIDTH: u32 = 480;

pub(crate) const FILE: usize = 0;
pub(crate) const EDIT: usize = 1;
pub(crate) const DIVIDER: usize = 2;
pub(crate) const DISABLED: usize = 3;
pub(crate) const QUIT: usize = 4;

/// File and Edit have submenus; the rest do not.
pub(crate) fn sample_config() -> MenuConfig {
    MenuConfig::with_items(vec![
        ItemDescriptor::new("File")
            .submenu(vec![ItemDescriptor::new("New"), ItemDescriptor::new("Open")]),
        ItemDescriptor::new("Edit").submenu(vec![
            ItemDescriptor::new("Cut"),
            ItemDescriptor::new("Copy").disabled(true),
        ]),
        ItemDescriptor::divider(),
        ItemDescriptor::new("Print").disabled(true),
        ItemDescriptor::new("Quit").shortcut("Ctrl+Q"),
    ])
    .z_index(2)
}

pub(crate) fn sample_menu(viewport_width: u32) -> Menu {
    let mut menu = Menu::new(sample_config());
    menu.render(viewport_width);
    menu
}

pub(crate) fn node_of(menu: &Menu, index: usize) -> NodeId {
    menu.items()[index].node().id()
}

pub(crate) fn open_count(menu: &Menu) -> usize {
    menu.items().iter().filter(|item| item.is_submenu_open()).count()
}

pub(crate) fn record_selections(menu: &mut Menu) -> Arc<Mutex<Vec<ItemSelectedEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    menu.on_item_selected(move |event| sink.lock().push(event.clone()));
    events
}
