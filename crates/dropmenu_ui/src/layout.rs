//! Layout-mode controller and positioning veto.

use dropmenu_core::LayoutMode;

use crate::dom::CSS_MENU_INLINE;
use crate::menu::Menu;
use crate::position::Point;

impl Menu {
    /// Current layout mode. Derived from the viewport width, never set directly.
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    /// Recompute the layout mode from the viewport width.
    pub fn sync_ui(&mut self, viewport_width: u32) {
        if self.destroyed {
            return;
        }
        self.update_layout_mode(viewport_width);
    }

    /// React to a window resize.
    pub fn on_window_resize(&mut self, viewport_width: u32) {
        if self.destroyed {
            return;
        }
        self.update_layout_mode(viewport_width);
    }

    fn update_layout_mode(&mut self, viewport_width: u32) {
        let mode = LayoutMode::from_viewport_width(viewport_width);
        if mode == self.layout_mode {
            return;
        }

        let previous = std::mem::replace(&mut self.layout_mode, mode);
        tracing::debug!(menu = %self.id, %previous, current = %mode, viewport_width, "Layout mode changed");

        self.after_layout_mode_change();
    }

    fn after_layout_mode_change(&mut self) {
        self.bounding_box.classes.toggle(CSS_MENU_INLINE, self.layout_mode.is_inline());

        // Overlay submenus only show up while hovering, so anything left open
        // from the inline layout goes away.
        if self.layout_mode.is_overlay() {
            self.hide_all_submenus();
        }
    }

    // ========== Positioning ==========

    /// Move the bounding box to an absolute position.
    ///
    /// Vetoed in the inline layout, which is static. Returns whether the
    /// position was applied.
    pub fn set_xy(&mut self, xy: Point) -> bool {
        if self.destroyed {
            return false;
        }
        if self.layout_mode.is_inline() {
            tracing::trace!(menu = %self.id, x = xy.x, y = xy.y, "Positioning vetoed in inline layout");
            return false;
        }
        self.position.set_xy(xy);
        true
    }

    /// Absolute position, if one was applied.
    pub fn xy(&self) -> Option<Point> {
        self.position.xy()
    }

    /// Stacking order of the menu.
    pub fn z_index(&self) -> i32 {
        self.stack.z_index()
    }

    /// Change the stacking order. Submenus opened afterwards sit one above it.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.stack.set_z_index(z_index);
    }
}
