//! Single-task event loop feeding UI events to a shared menu.
//!
//! The loop owns the receiving end of an unbounded channel and sleeps until
//! the menu's pending hover deadline between messages. Selection listeners
//! run while the menu is locked and must not lock it again.

use std::ops::ControlFlow;
use std::sync::Arc;

use dropmenu_core::{ItemId, MenuError, SelectionSource};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time;

use crate::dom::NodeId;
use crate::menu::Menu;
use crate::position::Point;

/// UI events delivered to the loop.
#[derive(Debug, Clone)]
pub enum MenuInput {
    /// Pointer click on a node.
    Click(NodeId),
    /// Pointer entered a node.
    Hover(NodeId),
    /// Window resized to the given viewport width.
    Resize(u32),
    /// Key combination pressed, e.g. `"Ctrl+Q"`.
    KeyCombo(String),
    /// An entry of an item's submenu was selected.
    SubmenuEntry { item: ItemId, entry: ItemId, src: SelectionSource },
    /// Untyped `items` assignment.
    SetItems(Value),
    /// Hide every open submenu.
    HideAll,
    /// Move the menu.
    SetXy(Point),
    /// Destroy the menu and stop the loop.
    Destroy,
}

/// Cloneable sending half for a running loop.
#[derive(Debug, Clone)]
pub struct MenuSender {
    tx: mpsc::UnboundedSender<MenuInput>,
}

impl MenuSender {
    /// Queue an input. Fails once the loop has stopped.
    pub fn send(&self, input: MenuInput) -> Result<(), MenuError> {
        self.tx.send(input).map_err(|_| MenuError::Destroyed)
    }
}

/// Event loop driving one menu.
pub struct MenuLoop {
    menu: Arc<Mutex<Menu>>,
    rx: mpsc::UnboundedReceiver<MenuInput>,
}

enum Wake {
    Input(Option<MenuInput>),
    Timer,
}

impl MenuLoop {
    /// Create a loop for a shared menu.
    pub fn new(menu: Arc<Mutex<Menu>>) -> (Self, MenuSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { menu, rx }, MenuSender { tx })
    }

    /// The menu this loop drives.
    pub fn menu(&self) -> Arc<Mutex<Menu>> {
        self.menu.clone()
    }

    /// Process inputs until every sender is dropped or the menu is destroyed.
    ///
    /// Returns the number of inputs processed.
    pub async fn run(mut self) -> usize {
        let mut processed = 0;
        tracing::debug!("Menu event loop started");

        loop {
            let deadline = self.menu.lock().next_deadline();
            let wake = match deadline {
                Some(deadline) => {
                    tokio::select! {
                        input = self.rx.recv() => Wake::Input(input),
                        _ = time::sleep_until(time::Instant::from_std(deadline)) => Wake::Timer,
                    }
                }
                None => Wake::Input(self.rx.recv().await),
            };

            match wake {
                Wake::Timer => {
                    self.menu.lock().poll_timers(now());
                }
                Wake::Input(None) => break,
                Wake::Input(Some(input)) => {
                    processed += 1;
                    if self.apply(input).is_break() {
                        break;
                    }
                }
            }
        }

        tracing::debug!(processed, "Menu event loop stopped");
        processed
    }

    fn apply(&self, input: MenuInput) -> ControlFlow<()> {
        let mut menu = self.menu.lock();
        match input {
            MenuInput::Click(node) => {
                menu.on_click(node);
            }
            MenuInput::Hover(node) => menu.on_mouse_enter(node, now()),
            MenuInput::Resize(width) => menu.on_window_resize(width),
            MenuInput::KeyCombo(combo) => {
                menu.handle_key_combo(&combo);
            }
            MenuInput::SubmenuEntry { item, entry, src } => {
                menu.select_submenu_entry(item, entry, src);
            }
            MenuInput::SetItems(value) => {
                if let Err(e) = menu.set_items_from_value(&value) {
                    tracing::debug!(error = %e, "Items assignment ignored");
                }
            }
            MenuInput::HideAll => menu.hide_all_submenus(),
            MenuInput::SetXy(xy) => {
                menu.set_xy(xy);
            }
            MenuInput::Destroy => {
                menu.destroy();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// Current time on the runtime's clock, which tests may pause.
fn now() -> std::time::Instant {
    time::Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::time::Duration;

    fn spawn_loop(viewport_width: u32) -> (Arc<Mutex<Menu>>, MenuSender, tokio::task::JoinHandle<usize>) {
        let menu = Arc::new(Mutex::new(sample_menu(viewport_width)));
        let (event_loop, sender) = MenuLoop::new(menu.clone());
        let handle = tokio::spawn(event_loop.run());
        (menu, sender, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_hover_opens_only_last_item() {
        let (menu, sender, _handle) = spawn_loop(OVERLAY_WIDTH);
        let (file, edit) = {
            let menu = menu.lock();
            (node_of(&menu, FILE), node_of(&menu, EDIT))
        };

        sender.send(MenuInput::Hover(file)).unwrap();
        time::sleep(Duration::from_millis(100)).await;
        sender.send(MenuInput::Hover(edit)).unwrap();

        time::sleep(Duration::from_millis(150)).await;
        assert_eq!(open_count(&menu.lock()), 0);

        time::sleep(Duration::from_millis(100)).await;
        let menu = menu.lock();
        assert!(!menu.items()[FILE].is_submenu_open());
        assert!(menu.items()[EDIT].is_submenu_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_reaches_listener() {
        let (menu, sender, _handle) = spawn_loop(OVERLAY_WIDTH);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let quit = {
            let mut menu = menu.lock();
            menu.on_item_selected(move |event| {
                let _ = tx.send((event.label().to_string(), event.src()));
            });
            node_of(&menu, QUIT)
        };

        sender.send(MenuInput::Click(quit)).unwrap();
        sender.send(MenuInput::KeyCombo("ctrl+q".into())).unwrap();

        assert_eq!(rx.recv().await, Some(("Quit".to_string(), SelectionSource::Click)));
        assert_eq!(rx.recv().await, Some(("Quit".to_string(), SelectionSource::Shortcut)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_and_positioning() {
        let (menu, sender, handle) = spawn_loop(OVERLAY_WIDTH);

        sender.send(MenuInput::Resize(INLINE_WIDTH)).unwrap();
        sender.send(MenuInput::SetXy(Point::new(1.0, 2.0))).unwrap();
        drop(sender);

        assert_eq!(handle.await.unwrap(), 2);
        let menu = menu.lock();
        assert!(menu.layout_mode().is_inline());
        assert_eq!(menu.xy(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_items_do_not_stop_loop() {
        let (menu, sender, handle) = spawn_loop(OVERLAY_WIDTH);

        sender.send(MenuInput::SetItems(Value::String("nope".into()))).unwrap();
        sender.send(MenuInput::SetItems(serde_json::json!([{"label": "Only"}]))).unwrap();
        drop(sender);

        assert_eq!(handle.await.unwrap(), 2);
        assert_eq!(menu.lock().items().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_stops_loop() {
        let (menu, sender, handle) = spawn_loop(OVERLAY_WIDTH);
        let file = node_of(&menu.lock(), FILE);

        sender.send(MenuInput::Hover(file)).unwrap();
        sender.send(MenuInput::Destroy).unwrap();

        assert_eq!(handle.await.unwrap(), 2);
        assert!(sender.send(MenuInput::HideAll).is_err());

        let menu = menu.lock();
        assert!(menu.is_destroyed());
        assert_eq!(menu.active_subscriptions(), 0);
        assert_eq!(menu.next_deadline(), None);
    }
}
