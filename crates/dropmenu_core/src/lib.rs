//! Core types and utilities for the dropmenu component.
//!
//! - **error**: Error handling for item validation and configuration
//! - **models**: IDs, item descriptors, layout mode and selection sources
//! - **config**: JSON menu configuration
//! - **logging**: Structured logging setup

pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use config::{parse_items, MenuConfig, DEFAULT_HOVER_DELAY_MS};
pub use error::MenuError;
pub use models::{
    ItemDescriptor, ItemId, LayoutMode, MenuId, SelectionSource, MIN_OVERLAY_VIEWPORT_WIDTH,
};
