//! Data models for menus, items, layout and selection.

pub mod ids;
pub mod item;
pub mod layout;
pub mod selection;

pub use ids::{ItemId, MenuId};
pub use item::ItemDescriptor;
pub use layout::{LayoutMode, MIN_OVERLAY_VIEWPORT_WIDTH};
pub use selection::SelectionSource;
