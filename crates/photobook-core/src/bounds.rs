//! Keeps a turning page from passing through the page ahead of it.

use crate::page::{Direction, FLAT_LEFT, FLAT_RIGHT, PageId};
use crate::queue::TurnQueue;

/// Gap kept between a page and the one ahead so their faces never render
/// coplanar.
pub const COPLANAR_MARGIN: f64 = 0.25;

/// Legal rotation range for one page, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationBounds {
    pub lower: f64,
    pub upper: f64,
    /// Flat angle the page starts its turn from.
    pub rest: f64,
}

impl RotationBounds {
    /// The whole `[-180, 0]` range.
    pub fn full(direction: Direction) -> Self {
        RotationBounds {
            lower: FLAT_LEFT,
            upper: FLAT_RIGHT,
            rest: direction.start_angle(),
        }
    }

    /// Empty when the page ahead has not yet cleared the margin.
    pub fn is_empty(self) -> bool {
        self.lower > self.upper
    }

    /// Clamp into range. An empty range pins the page at its resting angle.
    pub fn clamp(self, angle: f64) -> f64 {
        if self.is_empty() {
            return self.rest;
        }
        angle.max(self.lower).min(self.upper)
    }

    pub fn contains(self, angle: f64) -> bool {
        angle >= self.lower && angle <= self.upper
    }
}

/// Range `page` may rotate through given the pages already turning ahead of
/// it. Unknown pages and the oldest page in flight get the full range.
pub fn rotation_bounds(queue: &TurnQueue, direction: Direction, page: PageId) -> RotationBounds {
    let full = RotationBounds::full(direction);
    let Some(index) = queue.position(page) else {
        return full;
    };
    let Some(ahead) = queue.ahead_of(index) else {
        return full;
    };
    match direction {
        Direction::Next => RotationBounds {
            lower: ahead.angle() + COPLANAR_MARGIN,
            ..full
        },
        Direction::Previous => RotationBounds {
            upper: ahead.angle() - COPLANAR_MARGIN,
            ..full
        },
    }
}
