//! Menu configuration loaded from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MenuError;
use crate::models::ItemDescriptor;

/// Default quiet period before a hovered item's submenu opens.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 200;

/// Construction configuration for a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Items that should be inside the menu.
    #[serde(default)]
    pub items: Vec<ItemDescriptor>,
    /// Stacking order of the menu. Submenus open one level above it.
    #[serde(default)]
    pub z_index: i32,
    /// Hover quiet period in milliseconds.
    #[serde(default = "default_hover_delay_ms")]
    pub hover_delay_ms: u64,
}

fn default_hover_delay_ms() -> u64 {
    DEFAULT_HOVER_DELAY_MS
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self { items: Vec::new(), z_index: 0, hover_delay_ms: DEFAULT_HOVER_DELAY_MS }
    }
}

impl MenuConfig {
    /// Create a configuration holding the given items.
    pub fn with_items(items: Vec<ItemDescriptor>) -> Self {
        Self { items, ..Default::default() }
    }

    /// Builder: set the stacking order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Hover quiet period as a duration.
    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }

    /// Parse a configuration from a JSON value.
    ///
    /// `layout_mode` is read-only; a value supplied here is ignored.
    pub fn from_value(value: Value) -> Result<Self, MenuError> {
        let Value::Object(mut map) = value else {
            return Err(MenuError::config_with_hint(
                "menu configuration must be a JSON object",
                "Wrap the settings in { ... }",
            ));
        };

        if map.remove("layout_mode").is_some() {
            tracing::warn!("Ignoring read-only layout_mode in menu configuration");
        }

        let items = match map.remove("items") {
            Some(items) => parse_items(&items)?,
            None => Vec::new(),
        };

        let mut config: MenuConfig = serde_json::from_value(Value::Object(map))?;
        config.items = items;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, MenuError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading menu configuration");
        Self::from_json_str(&contents)
    }
}

/// Validate an untyped `items` value.
///
/// The value must be an array whose entries are item descriptor objects.
pub fn parse_items(value: &Value) -> Result<Vec<ItemDescriptor>, MenuError> {
    let Value::Array(entries) = value else {
        return Err(MenuError::invalid_items(format!("expected an array, got {}", kind(value))));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(MenuError::invalid_items(format!(
                    "entry {index} must be an object, got {}",
                    kind(entry)
                )));
            }
            ItemDescriptor::deserialize(entry)
                .map_err(|e| MenuError::invalid_items(format!("entry {index}: {e}")))
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
