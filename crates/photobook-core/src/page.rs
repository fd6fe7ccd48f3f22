//! A single page mid-turn.

use crate::sequence::Face;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Angle of a page lying flat on the right, unturned side.
pub const FLAT_RIGHT: f64 = 0.0;
/// Angle of a page lying flat on the left, turned side.
pub const FLAT_LEFT: f64 = -180.0;
/// Past this angle a page's back face must paint above its siblings.
pub const REORDER_THRESHOLD: f64 = -90.0;

/// Identity of a turning page. Assigned in creation order, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct PageId(#[ts(type = "number")] pub u64);

impl PageId {
    pub fn offset(self, by: u64) -> PageId {
        PageId(self.0 + by)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Cursor delta of one turn.
    pub fn step(self) -> i64 {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }

    /// Angle a freshly created page starts from.
    pub fn start_angle(self) -> f64 {
        match self {
            Direction::Next => FLAT_RIGHT,
            Direction::Previous => FLAT_LEFT,
        }
    }

    /// Angle a page settles at once its turn completes.
    pub fn target_angle(self) -> f64 {
        match self {
            Direction::Next => FLAT_LEFT,
            Direction::Previous => FLAT_RIGHT,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Next => Direction::Previous,
            Direction::Previous => Direction::Next,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        };
        write!(f, "{}", label)
    }
}

/// Discrete classification of a turn; governs cover substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Phase {
    NextStart,
    NextMiddle,
    NextEnd,
    PreviousStart,
    PreviousMiddle,
    PreviousEnd,
}

impl Phase {
    pub fn middle(direction: Direction) -> Phase {
        match direction {
            Direction::Next => Phase::NextMiddle,
            Direction::Previous => Phase::PreviousMiddle,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Phase::NextStart | Phase::NextMiddle | Phase::NextEnd => Direction::Next,
            Phase::PreviousStart | Phase::PreviousMiddle | Phase::PreviousEnd => {
                Direction::Previous
            }
        }
    }

    pub fn is_middle(self) -> bool {
        matches!(self, Phase::NextMiddle | Phase::PreviousMiddle)
    }
}

/// A page mid-turn.
///
/// `direction` never changes. `phase`, the two faces and `skip_count` change
/// only when a later page is merged into this one by the reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct TurningPage {
    id: PageId,
    direction: Direction,
    phase: Phase,
    angle: f64,
    front: Face,
    back: Face,
    skip_count: u32,
    reordered: bool,
}

impl TurningPage {
    pub fn new(id: PageId, phase: Phase, front: Face, back: Face) -> Self {
        let direction = phase.direction();
        Self {
            id,
            direction,
            phase,
            angle: direction.start_angle(),
            front,
            back,
            skip_count: 1,
            reordered: false,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Face seen while the page lies on the right.
    pub fn front(&self) -> Face {
        self.front
    }

    /// Face seen while the page lies on the left.
    pub fn back(&self) -> Face {
        self.back
    }

    pub fn skip_count(&self) -> u32 {
        self.skip_count
    }

    pub fn is_reordered(&self) -> bool {
        self.reordered
    }

    pub fn carries_cover(&self) -> bool {
        self.front.is_cover() || self.back.is_cover()
    }

    /// Whether the page lies flat on either side.
    pub fn is_resting(&self) -> bool {
        self.angle == FLAT_RIGHT || self.angle == FLAT_LEFT
    }

    /// Store a new angle. Returns `true` exactly once, when the page first
    /// crosses the halfway point in its direction of travel.
    pub fn set_angle(&mut self, angle: f64) -> bool {
        self.angle = angle;
        if self.reordered {
            return false;
        }
        let crossed = match self.direction {
            Direction::Next => angle < REORDER_THRESHOLD,
            Direction::Previous => angle > REORDER_THRESHOLD,
        };
        if crossed {
            self.reordered = true;
        }
        crossed
    }

    /// Take over a later page that finished first: this page now stands for
    /// both turns and shows the later page's final faces.
    pub fn absorb(&mut self, later: &TurningPage) {
        debug_assert_eq!(self.direction, later.direction);
        self.skip_count += later.skip_count;
        self.phase = later.phase;
        self.front = later.front;
        self.back = later.back;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::CoverSide;

    #[test]
    fn new_pages_start_flat_on_their_origin_side() {
        let next = TurningPage::new(PageId(0), Phase::NextMiddle, Face::Image(1), Face::Image(2));
        let prev = TurningPage::new(
            PageId(1),
            Phase::PreviousMiddle,
            Face::Image(0),
            Face::Image(1),
        );
        assert_eq!(next.angle(), FLAT_RIGHT);
        assert_eq!(prev.angle(), FLAT_LEFT);
        assert!(next.is_resting());
        assert_eq!(next.skip_count(), 1);
        assert_eq!(prev.direction(), Direction::Previous);
        assert_eq!(prev.direction().opposite(), Direction::Next);
    }

    #[test]
    fn reorder_fires_once_past_halfway() {
        let mut page =
            TurningPage::new(PageId(0), Phase::NextMiddle, Face::Image(0), Face::Image(1));
        assert!(!page.set_angle(-45.0));
        assert!(!page.set_angle(-90.0));
        assert!(page.set_angle(-91.0));
        assert!(!page.set_angle(-120.0));
        assert!(!page.set_angle(-30.0));
        assert!(page.is_reordered());
    }

    #[test]
    fn previous_pages_reorder_when_rising_past_halfway() {
        let mut page = TurningPage::new(
            PageId(0),
            Phase::PreviousMiddle,
            Face::Image(0),
            Face::Image(1),
        );
        assert!(!page.set_angle(-150.0));
        assert!(page.set_angle(-89.5));
    }

    #[test]
    fn absorb_takes_later_faces_and_sums_skips() {
        let mut first =
            TurningPage::new(PageId(0), Phase::NextMiddle, Face::Image(3), Face::Image(4));
        let later = TurningPage::new(
            PageId(1),
            Phase::NextEnd,
            Face::Image(4),
            Face::Cover(CoverSide::Back),
        );
        first.absorb(&later);
        assert_eq!(first.skip_count(), 2);
        assert_eq!(first.phase(), Phase::NextEnd);
        assert_eq!(first.front(), Face::Image(4));
        assert_eq!(first.back(), Face::Cover(CoverSide::Back));
        assert!(first.carries_cover());
    }
}
