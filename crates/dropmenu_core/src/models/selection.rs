//! Trigger kinds for item selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What caused an item to be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSource {
    /// A pointer click on the item.
    Click,
    /// The item's keyboard shortcut.
    Shortcut,
    /// An entry picked inside an open nested submenu.
    Submenu,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Click => "click",
            Self::Shortcut => "shortcut",
            Self::Submenu => "submenu",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_names() {
        assert_eq!(SelectionSource::Submenu.to_string(), "submenu");
        assert_eq!(serde_json::to_string(&SelectionSource::Shortcut).unwrap(), "\"shortcut\"");
    }
}
