//! Pointer drags mapped to rotation angles.
//!
//! Pointer positions are measured horizontally from the spine, so a press on
//! the right half has a positive origin and a press on the left half a
//! negative one. Dragging from the origin across to its mirror image on the
//! other side of the spine turns the page fully.

use crate::page::{Direction, FLAT_LEFT, FLAT_RIGHT, PageId};

/// Raw drag angle for a pointer position, before neighbour bounds apply.
pub fn drag_angle(direction: Direction, origin_x: f64, pointer_x: f64) -> f64 {
    let raw = ((pointer_x - origin_x) * (180.0 / (2.0 * origin_x))).clamp(FLAT_LEFT, FLAT_RIGHT);
    match direction {
        Direction::Next => raw,
        Direction::Previous => FLAT_LEFT - raw,
    }
}

/// A drag origin on the spine would divide by zero.
pub fn is_valid_origin(origin_x: f64) -> bool {
    origin_x.is_finite() && origin_x != 0.0
}

/// State of the one active pointer drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragController {
    page: PageId,
    direction: Direction,
    origin_x: f64,
    last_x: f64,
    speed: f64,
}

impl DragController {
    pub fn new(page: PageId, direction: Direction, origin_x: f64) -> Self {
        Self {
            page,
            direction,
            origin_x,
            last_x: origin_x,
            speed: 0.0,
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Signed pointer delta between the last two samples.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Record a pointer sample and return its raw angle.
    pub fn sample(&mut self, pointer_x: f64) -> f64 {
        self.speed = pointer_x - self.last_x;
        self.last_x = pointer_x;
        drag_angle(self.direction, self.origin_x, pointer_x)
    }
}
