//! Turn initiation: guards, page allocation and the optimistic cursor step.

use crate::book::Book;
use crate::browse::{assign_faces, resolve_browse_state};
use crate::cursor::step_index;
use crate::effect::{Effect, Surface};
use crate::page::{Direction, PageId, Phase, TurningPage};
use std::fmt;
use tracing::debug;

/// Why a turn request created no page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejection {
    NoImages,
    /// Wrapping needs at least two images to have somewhere to go.
    TooFewToWrap,
    OppositeTurnInFlight,
    AtEndCover,
    AtStartCover,
}

impl fmt::Display for TurnRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TurnRejection::NoImages => "book has no images",
            TurnRejection::TooFewToWrap => "wrap-around needs two or more images",
            TurnRejection::OppositeTurnInFlight => "a turn in the other direction is in flight",
            TurnRejection::AtEndCover => "already at the end cover",
            TurnRejection::AtStartCover => "already at the start cover",
        };
        write!(f, "{}", label)
    }
}

impl Book {
    fn is_turning_towards(&self, direction: Direction) -> bool {
        match direction {
            Direction::Next => self.turning_forwards,
            Direction::Previous => self.turning_backwards,
        }
    }

    pub(crate) fn check_turn(&self, direction: Direction) -> Result<(), TurnRejection> {
        let n = self.images.len() as i64;
        if n == 0 {
            return Err(TurnRejection::NoImages);
        }
        if self.wrap_around && n < 2 {
            return Err(TurnRejection::TooFewToWrap);
        }
        if self.is_turning_towards(direction.opposite()) {
            return Err(TurnRejection::OppositeTurnInFlight);
        }
        match direction {
            Direction::Next if !self.wrap_around && self.cursor.current >= n => {
                Err(TurnRejection::AtEndCover)
            }
            Direction::Previous if !self.wrap_around && self.cursor.current <= -1 => {
                Err(TurnRejection::AtStartCover)
            }
            _ => Ok(()),
        }
    }

    /// Start a turn: allocate the page, decide every face, advance the
    /// cursor and queue the page. Returns `None` when a guard rejects the
    /// turn, in which case nothing changed.
    pub(crate) fn prepare_for_turn(&mut self, direction: Direction) -> Option<(PageId, Vec<Effect>)> {
        if let Err(reason) = self.check_turn(direction) {
            debug!(%direction, current = self.cursor.current, %reason, "Turn rejected");
            return None;
        }

        match direction {
            Direction::Next => self.turning_forwards = true,
            Direction::Previous => self.turning_backwards = true,
        }
        let id = self.next_id;
        self.next_id = id.offset(1);

        let state = resolve_browse_state(direction, &self.cursor, self.images.len(), self.wrap_around);
        let faces = assign_faces(&state, &self.images);
        // A covered static side must stay put until the cover page lands.
        let oldest_is_middle = self.queue.front().is_none_or(|page| page.phase().is_middle());

        let mut effects = vec![
            Effect::InsertPage { page: id },
            Effect::SetImage {
                surface: Surface::PageFront(id),
                face: faces.front,
            },
            Effect::SetImage {
                surface: Surface::PageBack(id),
                face: faces.back,
            },
            Effect::SetRotation {
                page: id,
                angle: direction.start_angle(),
            },
        ];
        let left = Effect::SetImage {
            surface: Surface::Left,
            face: faces.left,
        };
        let right = Effect::SetImage {
            surface: Surface::Right,
            face: faces.right,
        };
        match state.phase {
            Phase::NextMiddle => {
                if oldest_is_middle {
                    effects.push(left);
                }
                effects.push(right);
            }
            Phase::PreviousMiddle => {
                effects.push(left);
                if oldest_is_middle {
                    effects.push(right);
                }
            }
            Phase::NextStart | Phase::NextEnd | Phase::PreviousStart | Phase::PreviousEnd => {
                effects.push(left);
                effects.push(right);
            }
        }

        let origin = self.cursor.current;
        self.cursor.current = step_index(
            origin,
            direction.step(),
            self.images.len(),
            self.wrap_around,
        );
        self.queue
            .push(TurningPage::new(id, state.phase, faces.front, faces.back));
        debug!(
            page = %id,
            %direction,
            phase = ?state.phase,
            from = origin,
            to = self.cursor.current,
            in_flight = self.queue.len(),
            "Turn started"
        );
        Some((id, effects))
    }
}
