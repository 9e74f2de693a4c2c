//! Line-oriented script driving a menu.
//!
//! ```text
//! # comments and blank lines are skipped
//! hover 0
//! wait 250
//! click 4
//! key Ctrl+Q
//! pick 0 1
//! resize 480
//! move 10 20
//! items [{"label": "Undo"}]
//! hideall
//! state
//! destroy
//! ```

use std::time::Duration;

use dropmenu_core::{ItemId, MenuError, SelectionSource};
use dropmenu_ui::{Menu, MenuInput, Point};
use serde_json::Value;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Click the item at an index.
    Click(usize),
    /// Hover the item at an index.
    Hover(usize),
    /// Select a submenu entry: item index, entry index.
    Pick(usize, usize),
    /// Press a key combination.
    Key(String),
    /// Resize the window.
    Resize(u32),
    /// Move the menu.
    Move(f32, f32),
    /// Replace the items.
    Items(Value),
    /// Hide all submenus.
    HideAll,
    /// Let time pass.
    Wait(Duration),
    /// Print the layout mode and open submenu.
    State,
    /// Destroy the menu.
    Destroy,
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, MenuError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match word {
        "click" => Command::Click(number(word, rest)?),
        "hover" => Command::Hover(number(word, rest)?),
        "pick" => {
            let (item, entry) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| bad(word, "expected `pick ITEM ENTRY`"))?;
            Command::Pick(number(word, item)?, number(word, entry.trim())?)
        }
        "key" if !rest.is_empty() => Command::Key(rest.to_string()),
        "resize" => Command::Resize(number(word, rest)?),
        "move" => {
            let (x, y) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| bad(word, "expected `move X Y`"))?;
            Command::Move(number(word, x)?, number(word, y.trim())?)
        }
        "items" => Command::Items(serde_json::from_str(rest)?),
        "wait" => Command::Wait(Duration::from_millis(number(word, rest)?)),
        "hideall" => Command::HideAll,
        "state" => Command::State,
        "destroy" => Command::Destroy,
        _ => return Err(bad(word, "unknown command")),
    };
    Ok(Some(command))
}

/// Parse a whole script.
pub fn parse_script(script: &str) -> Result<Vec<Command>, MenuError> {
    script
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match parse_line(line) {
            Ok(command) => command.map(Ok),
            Err(e) => Some(Err(MenuError::config_with_hint(
                format!("line {}: {e}", index + 1),
                "See `dropmenu --help` for the script syntax",
            ))),
        })
        .collect()
}

impl Command {
    /// Translate into a loop input, resolving item indexes against the menu.
    ///
    /// Returns `Ok(None)` for commands the driver handles itself.
    pub fn to_input(&self, menu: &Menu) -> Result<Option<MenuInput>, MenuError> {
        let input = match self {
            Self::Click(index) => MenuInput::Click(item_at(menu, *index)?.node().id()),
            Self::Hover(index) => MenuInput::Hover(item_at(menu, *index)?.node().id()),
            Self::Pick(index, entry) => {
                let item = item_at(menu, *index)?;
                let entry = item.submenu_entries().get(*entry).ok_or_else(|| {
                    MenuError::config(format!("item {index} has no submenu entry {entry}"))
                })?;
                MenuInput::SubmenuEntry {
                    item: item.id(),
                    entry: entry.id(),
                    src: SelectionSource::Submenu,
                }
            }
            Self::Key(combo) => MenuInput::KeyCombo(combo.clone()),
            Self::Resize(width) => MenuInput::Resize(*width),
            Self::Move(x, y) => MenuInput::SetXy(Point::new(*x, *y)),
            Self::Items(value) => MenuInput::SetItems(value.clone()),
            Self::HideAll => MenuInput::HideAll,
            Self::Destroy => MenuInput::Destroy,
            Self::Wait(_) | Self::State => return Ok(None),
        };
        Ok(Some(input))
    }
}

/// Describe the menu's state in one line.
pub fn describe(menu: &Menu) -> String {
    let open = menu
        .open_submenu_item()
        .and_then(|id: ItemId| menu.item(id))
        .filter(|item| item.is_submenu_open())
        .map_or("none", |item| item.label());
    format!("layout={} open={} items={}", menu.layout_mode(), open, menu.items().len())
}

fn item_at(menu: &Menu, index: usize) -> Result<&dropmenu_ui::MenuItem, MenuError> {
    menu.items()
        .get(index)
        .ok_or_else(|| MenuError::config(format!("no item at index {index}")))
}

fn number<T: std::str::FromStr>(word: &str, value: &str) -> Result<T, MenuError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| bad(word, &format!("`{value}`: {e}")))
}

fn bad(word: &str, message: &str) -> MenuError {
    MenuError::config(format!("{word}: {message}"))
}
