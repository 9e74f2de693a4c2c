//! Headless dropdown/inline menu component.
//!
//! A [`Menu`] owns an ordered list of [`MenuItem`]s, switches between an
//! inline and an overlay layout depending on the viewport width, opens item
//! submenus on click (inline) or debounced hover (overlay), and fires a
//! preventable [`ItemSelectedEvent`] when a selectable item is chosen.

pub mod debounce;
pub mod dom;
pub mod event_loop;
mod layout;
pub mod menu;
pub mod menu_item;
pub mod position;
pub mod selection;
mod submenu;

#[cfg(test)]
mod test_support;

pub use dom::{ClassList, Container, Element, NodeId};
pub use event_loop::{MenuInput, MenuLoop, MenuSender};
pub use menu::{ItemSpec, ItemsSource, Menu};
pub use menu_item::{ItemEvent, MenuItem, SubmenuEntry, SubmenuState};
pub use position::Point;
pub use selection::{ItemSelectedEvent, ItemSelectedListener, ListenerId};
