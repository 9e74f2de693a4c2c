//! Submenu coordination: at most one item's submenu is open at a time.
//!
//! Inline menus toggle submenus on click. Overlay menus open them on hover,
//! debounced so that sweeping the pointer across items only opens the one it
//! settles on.

use std::time::Instant;

use dropmenu_core::{ItemId, MenuError, SelectionSource};

use crate::dom::NodeId;
use crate::menu::Menu;
use crate::selection::ItemSelectedEvent;

impl Menu {
    /// Item whose submenu is currently open.
    pub fn open_submenu_item(&self) -> Option<ItemId> {
        self.open_submenu_item
    }

    /// Show an item's submenu, hiding any other open submenu first.
    pub fn show_item_submenu(&mut self, id: ItemId) -> Result<(), MenuError> {
        if self.item(id).is_none() {
            return Err(MenuError::unknown_item(id));
        }

        if let Some(open) = self.open_submenu_item.take() {
            tracing::trace!(menu = %self.id, item = %open, "Hiding open submenu");
        }
        for item in self.items.iter_mut().filter(|item| item.id() != id) {
            item.hide_submenu();
        }

        let as_overlay = self.layout_mode.is_overlay();
        let z_index = self.stack.above();
        if let Some(item) = self.item_mut(id) {
            item.show_submenu(as_overlay, z_index);
        }
        self.open_submenu_item = Some(id);
        Ok(())
    }

    /// Hide an item's submenu. Always clears the open-item record.
    pub fn hide_item_submenu(&mut self, id: ItemId) -> Result<(), MenuError> {
        self.open_submenu_item = None;
        let item = self.item_mut(id).ok_or_else(|| MenuError::unknown_item(id))?;
        item.hide_submenu();
        Ok(())
    }

    /// Hides all the currently open submenus.
    pub fn hide_all_submenus(&mut self) {
        for item in &mut self.items {
            item.hide_submenu();
        }
        self.open_submenu_item = None;
    }

    /// A click on a node inside the menu.
    ///
    /// Inline menus toggle the clicked item's submenu. Either way the item is
    /// then selected. Returns the selection event, if one fired.
    pub fn on_click(&mut self, node: NodeId) -> Option<ItemSelectedEvent> {
        if self.destroyed {
            return None;
        }
        let id = self.delegate_target(node)?;

        if self.layout_mode.is_inline() {
            let open = self.item(id).is_some_and(|item| item.is_submenu_open());
            let toggled = if open { self.hide_item_submenu(id) } else { self.show_item_submenu(id) };
            if let Err(e) = toggled {
                tracing::debug!(error = %e, "Submenu toggle skipped");
            }
        }

        self.select_item(id, SelectionSource::Click)
    }

    /// The pointer entered a node inside the menu.
    ///
    /// Overlay menus arm the hover timer for the item; the submenu opens when
    /// `poll_timers` runs after the quiet period.
    pub fn on_mouse_enter(&mut self, node: NodeId, now: Instant) {
        if self.destroyed || !self.layout_mode.is_overlay() {
            return;
        }
        let Some(id) = self.delegate_target(node) else {
            return;
        };

        if let Some(superseded) = self.hover.call(id, now) {
            tracing::trace!(menu = %self.id, %superseded, item = %id, "Hover timer re-armed");
        }
    }

    /// When the pending hover should be handled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hover.deadline()
    }

    /// Fire the hover timer if its quiet period has elapsed.
    ///
    /// Returns the item whose submenu was shown.
    pub fn poll_timers(&mut self, now: Instant) -> Option<ItemId> {
        let id = self.hover.poll(now)?;
        match self.show_item_submenu(id) {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::debug!(error = %e, "Hovered item is gone");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::time::Duration;

    const QUIET: Duration = Duration::from_millis(200);

    fn is_open(menu: &Menu, index: usize) -> bool {
        menu.items()[index].is_submenu_open()
    }

    #[test]
    fn test_show_hides_previous() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let file = menu.items()[FILE].id();
        let edit = menu.items()[EDIT].id();

        menu.show_item_submenu(file).unwrap();
        menu.show_item_submenu(edit).unwrap();

        assert!(!is_open(&menu, FILE));
        assert!(is_open(&menu, EDIT));
        assert_eq!(menu.open_submenu_item(), Some(edit));
    }

    #[test]
    fn test_submenu_stacks_above_menu() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let file = menu.items()[FILE].id();
        menu.show_item_submenu(file).unwrap();

        let state = menu.items()[FILE].submenu_state().unwrap();
        assert!(state.as_overlay);
        assert_eq!(state.z_index, menu.z_index() + 1);
    }

    #[test]
    fn test_hide_clears_record_for_any_item() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let file = menu.items()[FILE].id();
        let quit = menu.items()[QUIT].id();
        menu.show_item_submenu(file).unwrap();

        menu.hide_item_submenu(quit).unwrap();
        assert_eq!(menu.open_submenu_item(), None);
        assert!(is_open(&menu, FILE));

        // Showing another item still leaves a single submenu open.
        let edit = menu.items()[EDIT].id();
        menu.show_item_submenu(edit).unwrap();
        assert_eq!(open_count(&menu), 1);

        menu.hide_all_submenus();
        assert_eq!(open_count(&menu), 0);
    }

    #[test]
    fn test_unknown_item() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let err = menu.show_item_submenu(ItemId::new()).unwrap_err();
        assert!(matches!(err, MenuError::UnknownItem { .. }));
    }

    #[test]
    fn test_inline_click_toggles() {
        let mut menu = sample_menu(INLINE_WIDTH);
        let file = node_of(&menu, FILE);

        menu.on_click(file);
        assert!(is_open(&menu, FILE));
        assert!(!menu.items()[FILE].submenu_state().unwrap().as_overlay);

        menu.on_click(file);
        assert!(!is_open(&menu, FILE));

        menu.on_click(file);
        assert!(is_open(&menu, FILE));
    }

    #[test]
    fn test_inline_click_other_item_swaps() {
        let mut menu = sample_menu(INLINE_WIDTH);
        menu.on_click(node_of(&menu, FILE));
        menu.on_click(node_of(&menu, EDIT));

        assert!(!is_open(&menu, FILE));
        assert!(is_open(&menu, EDIT));
    }

    #[test]
    fn test_overlay_click_does_not_toggle() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        menu.on_click(node_of(&menu, FILE));
        assert_eq!(open_count(&menu), 0);
    }

    #[test]
    fn test_hover_opens_after_quiet_period() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let start = Instant::now();
        menu.on_mouse_enter(node_of(&menu, FILE), start);

        assert_eq!(menu.poll_timers(start + Duration::from_millis(199)), None);
        assert!(!is_open(&menu, FILE));

        assert_eq!(menu.next_deadline(), Some(start + QUIET));
        assert_eq!(menu.poll_timers(start + QUIET), Some(menu.items()[FILE].id()));
        assert!(is_open(&menu, FILE));
    }

    #[test]
    fn test_rapid_hover_opens_only_last() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let start = Instant::now();
        menu.on_mouse_enter(node_of(&menu, FILE), start);
        menu.on_mouse_enter(node_of(&menu, EDIT), start + Duration::from_millis(120));

        assert_eq!(menu.poll_timers(start + QUIET), None);
        menu.poll_timers(start + Duration::from_millis(320));

        assert!(!is_open(&menu, FILE));
        assert!(is_open(&menu, EDIT));
    }

    #[test]
    fn test_hover_ignored_inline() {
        let mut menu = sample_menu(INLINE_WIDTH);
        let start = Instant::now();
        menu.on_mouse_enter(node_of(&menu, FILE), start);
        assert_eq!(menu.next_deadline(), None);
    }

    #[test]
    fn test_events_outside_content_box_ignored() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let events = record_selections(&mut menu);
        let stray = NodeId::next();

        assert!(menu.on_click(stray).is_none());
        menu.on_mouse_enter(stray, Instant::now());
        assert!(events.lock().is_empty());
        assert_eq!(menu.next_deadline(), None);
    }

    #[test]
    fn test_replacing_items_drops_pending_hover() {
        let mut menu = sample_menu(OVERLAY_WIDTH);
        let start = Instant::now();
        menu.on_mouse_enter(node_of(&menu, FILE), start);

        menu.set_items(Vec::<dropmenu_core::ItemDescriptor>::new()).unwrap();
        assert_eq!(menu.next_deadline(), None);
        assert_eq!(menu.poll_timers(start + QUIET), None);
    }

    #[test]
    fn test_single_open_submenu_under_mixed_operations() {
        let mut menu = sample_menu(INLINE_WIDTH);
        let mut now = Instant::now();
        let widths = [INLINE_WIDTH, OVERLAY_WIDTH];

        for step in 0..60 {
            let index = (step * 7) % menu.items().len();
            let node = node_of(&menu, index);
            match step % 4 {
                0 => {
                    menu.on_click(node);
                }
                1 => menu.on_mouse_enter(node, now),
                2 => menu.on_window_resize(widths[step % 3 % 2]),
                _ => {
                    menu.poll_timers(now);
                }
            }
            now += Duration::from_millis(90);
            assert!(open_count(&menu) <= 1, "step {step}");
        }
    }
}
