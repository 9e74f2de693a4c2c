//! Positioning and stacking collaborators held by the menu.

use serde::{Deserialize, Serialize};

/// Page coordinates in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Absolute position of the bounding box.
///
/// `None` means the box is laid out statically in document flow.
#[derive(Debug, Clone, Default)]
pub struct Position {
    xy: Option<Point>,
}

impl Position {
    /// Current absolute position, if any.
    pub fn xy(&self) -> Option<Point> {
        self.xy
    }

    /// Apply an absolute position.
    pub fn set_xy(&mut self, xy: Point) {
        self.xy = Some(xy);
    }

    /// Return to static layout.
    pub fn clear(&mut self) {
        self.xy = None;
    }
}

/// Stacking order of the bounding box.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    z_index: i32,
}

impl Stack {
    /// Create a stack at the given order.
    pub fn new(z_index: i32) -> Self {
        Self { z_index }
    }

    /// Current stacking order.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Change the stacking order.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Order for content shown directly above this box.
    pub fn above(&self) -> i32 {
        self.z_index.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_set_and_clear() {
        let mut position = Position::default();
        assert_eq!(position.xy(), None);
        position.set_xy(Point::new(10.0, 20.0));
        assert_eq!(position.xy(), Some(Point::new(10.0, 20.0)));
        position.clear();
        assert_eq!(position.xy(), None);
    }

    #[test]
    fn test_stack_above_saturates() {
        assert_eq!(Stack::new(4).above(), 5);
        assert_eq!(Stack::new(i32::MAX).above(), i32::MAX);
    }
}
