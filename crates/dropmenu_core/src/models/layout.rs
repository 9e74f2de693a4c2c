//! Layout mode derived from the viewport width.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewports narrower than this (in pixels) use the inline layout.
pub const MIN_OVERLAY_VIEWPORT_WIDTH: u32 = 768;

/// How the menu and its submenus are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Static, in-flow layout. Submenus open on click.
    Inline,
    /// Absolutely positioned layout. Submenus open on hover.
    #[default]
    Overlay,
}

impl LayoutMode {
    /// Derive the layout mode for a viewport of the given width.
    pub fn from_viewport_width(width: u32) -> Self {
        if width < MIN_OVERLAY_VIEWPORT_WIDTH {
            Self::Inline
        } else {
            Self::Overlay
        }
    }

    /// Check if this is the inline layout.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Check if this is the overlay layout.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Overlay)
    }

    /// Lowercase name, as used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Overlay => "overlay",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
