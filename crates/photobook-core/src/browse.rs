//! Which image belongs on which surface for a turn, and which phase the turn
//! is in.
//!
//! The four roles follow the book from left to right: `a` is the static left
//! side, `b` and `c` are the two faces of the turning page, `d` is the static
//! right side. For a forward turn `c` is the face currently visible on the
//! right and `b` the face revealed behind it; a backward turn swaps them.

use crate::cursor::{CursorState, step_index};
use crate::page::{Direction, Phase};
use crate::sequence::{CoverSide, Face, ImageSequence};

/// Cursor-space indices for the four visual roles plus the turn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseState {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub phase: Phase,
}

/// Faces for the static sides and the turning page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAssignment {
    pub left: Face,
    pub right: Face,
    pub front: Face,
    pub back: Face,
}

/// Phase of a turn starting at `current`. Must be computed before the cursor
/// advances. With wrap-around there is no first or last page, so every turn
/// is a middle turn.
pub fn phase_for(direction: Direction, current: i64, len: usize, wrap_around: bool) -> Phase {
    if wrap_around {
        return Phase::middle(direction);
    }
    let n = len as i64;
    match direction {
        Direction::Next if current == -1 => Phase::NextStart,
        Direction::Next if current == n - 1 => Phase::NextEnd,
        Direction::Previous if current == 0 => Phase::PreviousStart,
        Direction::Previous if current == n => Phase::PreviousEnd,
        _ => Phase::middle(direction),
    }
}

pub fn resolve_browse_state(
    direction: Direction,
    cursor: &CursorState,
    len: usize,
    wrap_around: bool,
) -> BrowseState {
    let revealed = step_index(cursor.current, direction.step(), len, wrap_around);
    let phase = phase_for(direction, cursor.current, len, wrap_around);
    match direction {
        Direction::Next => BrowseState {
            a: cursor.static_side,
            b: revealed,
            c: cursor.current,
            d: revealed,
            phase,
        },
        Direction::Previous => BrowseState {
            a: revealed,
            b: revealed,
            c: cursor.current,
            d: cursor.static_side,
            phase,
        },
    }
}

/// Faces for a turn about to start. Start and end phases put a cover on the
/// turning page where the cursor would point outside the images.
pub fn assign_faces(state: &BrowseState, images: &ImageSequence) -> FaceAssignment {
    let left = images.left_face(state.a);
    let right = images.right_face(state.d);
    match state.phase {
        Phase::NextStart => FaceAssignment {
            left,
            right,
            front: Face::Cover(CoverSide::Front),
            back: images.image_face(state.b),
        },
        Phase::NextMiddle => FaceAssignment {
            left,
            right,
            front: images.image_face(state.c),
            back: images.image_face(state.b),
        },
        Phase::NextEnd => FaceAssignment {
            left,
            right: Face::Empty,
            front: images.image_face(state.c),
            back: Face::Cover(CoverSide::Back),
        },
        Phase::PreviousStart => FaceAssignment {
            left: Face::Empty,
            right,
            front: Face::Cover(CoverSide::Front),
            back: images.image_face(state.c),
        },
        Phase::PreviousMiddle => FaceAssignment {
            left,
            right,
            front: images.image_face(state.b),
            back: images.image_face(state.c),
        },
        Phase::PreviousEnd => FaceAssignment {
            left,
            right: Face::Empty,
            front: images.image_face(state.b),
            back: Face::Cover(CoverSide::Back),
        },
    }
}

/// Static side faces once a turn of `phase` has settled. The side the page
/// landed on shows the settled position; the other side shows the newest
/// cursor position, since every page still in flight lies above it.
pub fn settled_faces(phase: Phase, cursor: &CursorState, images: &ImageSequence) -> (Face, Face) {
    match phase {
        Phase::NextStart | Phase::NextMiddle => (
            images.left_face(cursor.static_side),
            images.right_face(cursor.current),
        ),
        Phase::NextEnd => (Face::Cover(CoverSide::Back), Face::Empty),
        Phase::PreviousStart => (Face::Empty, Face::Cover(CoverSide::Front)),
        Phase::PreviousMiddle | Phase::PreviousEnd => (
            images.left_face(cursor.current),
            images.right_face(cursor.static_side),
        ),
    }
}
