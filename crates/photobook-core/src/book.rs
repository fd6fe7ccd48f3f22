//! The book: owns the images, the cursor and every page in flight.
//!
//! All operations are synchronous and return the [`Effect`]s the
//! presentation layer must apply. Animations are requested through
//! [`Effect::Animate`]; the host reports every step back through
//! [`Book::animation_step`] and the end through [`Book::turn_complete`], in
//! whatever order its animations actually finish.

use crate::animation::SettlePlan;
use crate::bounds::rotation_bounds;
use crate::browse::settled_faces;
use crate::config::BookConfig;
use crate::cursor::{CursorState, normalize_index, step_index};
use crate::drag::{DragController, is_valid_origin};
use crate::effect::{Effect, Surface};
use crate::page::{Direction, PageId, TurningPage};
use crate::queue::TurnQueue;
use crate::reconcile::{StateUpdate, reconcile};
use crate::sequence::ImageSequence;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct BookSnapshot {
    #[ts(type = "number")]
    pub current_image: i64,
    #[ts(type = "number")]
    pub static_side_image: i64,
    pub image_count: usize,
    pub wrap_around: bool,
    pub turning_forwards: bool,
    pub turning_backwards: bool,
    pub dragging: Option<PageId>,
    pub last_completed_id: Option<PageId>,
    pub queue: Vec<TurningPage>,
}

#[derive(Debug, Clone)]
pub enum BookCommand {
    GetSnapshot,
    Next,
    Previous,
    SetPage { page: i64 },
    DragTurn { direction: Direction, origin_x: f64 },
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    AnimationStep { page: PageId, angle: f64 },
    TurnComplete { page: PageId },
}

impl BookCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "book_get_snapshot",
            Self::Next => "book_next",
            Self::Previous => "book_previous",
            Self::SetPage { .. } => "book_set_page",
            Self::DragTurn { .. } => "book_drag_turn",
            Self::PointerDown { .. } => "book_pointer_down",
            Self::PointerMove { .. } => "book_pointer_move",
            Self::PointerUp => "book_pointer_up",
            Self::AnimationStep { .. } => "book_animation_step",
            Self::TurnComplete { .. } => "book_turn_complete",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookEvent {
    pub action: &'static str,
    pub effects: Vec<Effect>,
    pub snapshot: BookSnapshot,
}

#[derive(Debug, Clone)]
pub struct Book {
    pub(crate) images: ImageSequence,
    pub(crate) wrap_around: bool,
    page_buttons: bool,
    flip_duration: Duration,
    flick_speed_factor: f64,
    pub(crate) cursor: CursorState,
    pub(crate) queue: TurnQueue,
    pub(crate) turning_forwards: bool,
    pub(crate) turning_backwards: bool,
    pub(crate) next_id: PageId,
    /// Id after the last fully settled page.
    next_expected: PageId,
    drag: Option<DragController>,
}

impl Book {
    pub fn new(images: ImageSequence, config: &BookConfig) -> Self {
        let start = normalize_index(config.initial_page(), images.len(), config.wrap_around);
        info!(
            images = images.len(),
            wrap_around = config.wrap_around,
            start,
            "Opening book"
        );
        Self {
            images,
            wrap_around: config.wrap_around,
            page_buttons: config.page_buttons,
            flip_duration: config.page_flip_duration(),
            flick_speed_factor: config.flick_speed_factor,
            cursor: CursorState::at(start),
            queue: TurnQueue::new(),
            turning_forwards: false,
            turning_backwards: false,
            next_id: PageId(0),
            next_expected: PageId(0),
            drag: None,
        }
    }

    /// Effects that paint the book at rest on its current position.
    pub fn open(&self) -> Vec<Effect> {
        self.rest_faces(self.cursor.static_side)
    }

    pub fn next(&mut self) -> Vec<Effect> {
        self.commanded_turn(Direction::Next)
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        self.commanded_turn(Direction::Previous)
    }

    fn commanded_turn(&mut self, direction: Direction) -> Vec<Effect> {
        if let Some(drag) = &self.drag {
            debug!(%direction, page = %drag.page(), "Turn rejected while a page is dragged");
            return Vec::new();
        }
        let Some((id, mut effects)) = self.prepare_for_turn(direction) else {
            return Vec::new();
        };
        if let Some(page) = self.queue.get(id) {
            effects.push(Effect::Animate(self.settle_plan(page, 0.0)));
        }
        effects
    }

    /// Begin a pointer-driven turn with the pointer pressed at `origin_x`,
    /// measured from the spine.
    pub fn drag_turn(&mut self, direction: Direction, origin_x: f64) -> Vec<Effect> {
        if !is_valid_origin(origin_x) {
            debug!(%direction, origin_x, "Drag rejected: origin on the spine");
            return Vec::new();
        }
        if let Some(drag) = &self.drag {
            debug!(%direction, page = %drag.page(), "Drag rejected: another drag is active");
            return Vec::new();
        }
        let Some((id, effects)) = self.prepare_for_turn(direction) else {
            return Vec::new();
        };
        debug!(page = %id, %direction, origin_x, "Drag started");
        self.drag = Some(DragController::new(id, direction, origin_x));
        effects
    }

    /// Pointer pressed at `x` from the spine: the right half turns forwards,
    /// the left half backwards.
    pub fn pointer_down(&mut self, x: f64) -> Vec<Effect> {
        if !self.page_buttons {
            trace!(x, "Pointer turning disabled");
            return Vec::new();
        }
        let direction = if x > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        self.drag_turn(direction, x)
    }

    pub fn drag_move(&mut self, x: f64) -> Vec<Effect> {
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        let raw = drag.sample(x);
        let page = drag.page();
        self.apply_angle(page, raw)
    }

    /// Release the drag and hand the page to its settle animation.
    pub fn drag_release(&mut self) -> Vec<Effect> {
        let Some(drag) = self.drag.take() else {
            return Vec::new();
        };
        let Some(page) = self.queue.get(drag.page()) else {
            return Vec::new();
        };
        let plan = self.settle_plan(page, drag.speed());
        debug!(
            page = %plan.page,
            speed = drag.speed(),
            duration_ms = plan.duration_ms,
            "Drag released"
        );
        vec![Effect::Animate(plan)]
    }

    /// Intermediate angle reported by a running settle animation.
    pub fn animation_step(&mut self, page: PageId, angle: f64) -> Vec<Effect> {
        self.apply_angle(page, angle)
    }

    fn apply_angle(&mut self, id: PageId, angle: f64) -> Vec<Effect> {
        let Some(direction) = self.queue.get(id).map(TurningPage::direction) else {
            trace!(page = %id, "Angle for a page no longer in flight");
            return Vec::new();
        };
        let clamped = rotation_bounds(&self.queue, direction, id).clamp(angle);
        let Some(page) = self.queue.get_mut(id) else {
            return Vec::new();
        };
        let reordered = page.set_angle(clamped);
        trace!(page = %id, angle, clamped, "Page rotated");

        let mut effects = vec![Effect::SetRotation {
            page: id,
            angle: clamped,
        }];
        if reordered {
            debug!(page = %id, "Page passed halfway; raising it");
            effects.push(Effect::RaisePage { page: id });
        }
        effects
    }

    /// A settle animation finished.
    pub fn turn_complete(&mut self, id: PageId) -> Vec<Effect> {
        if self.drag.as_ref().is_some_and(|drag| drag.page() == id) {
            self.drag = None;
        }
        let outcome = reconcile(&self.queue, self.next_expected, id);
        self.queue = outcome.queue;
        match outcome.update {
            StateUpdate::Ignored => Vec::new(),
            StateUpdate::Merge { page, into } => {
                let mut effects = vec![Effect::RemovePage { page }];
                if let Some(survivor) = self.queue.get(into) {
                    effects.push(Effect::SetImage {
                        surface: Surface::PageFront(into),
                        face: survivor.front(),
                    });
                    effects.push(Effect::SetImage {
                        surface: Surface::PageBack(into),
                        face: survivor.back(),
                    });
                }
                effects
            }
            StateUpdate::Settle(page) => self.settle(page),
        }
    }

    fn settle(&mut self, page: TurningPage) -> Vec<Effect> {
        let skip = page.skip_count();
        let direction = page.direction();
        self.cursor.static_side = step_index(
            self.cursor.static_side,
            direction.step() * i64::from(skip),
            self.images.len(),
            self.wrap_around,
        );
        if self.queue.is_empty() {
            match direction {
                Direction::Next => self.turning_forwards = false,
                Direction::Previous => self.turning_backwards = false,
            }
            if !self.cursor.is_settled() {
                warn!(
                    current = self.cursor.current,
                    static_side = self.cursor.static_side,
                    "Book idle but the static side lags the cursor"
                );
            }
        }
        self.next_expected = page.id().offset(u64::from(skip));

        let (left, right) = settled_faces(page.phase(), &self.cursor, &self.images);
        debug!(
            page = %page.id(),
            skip,
            static_side = self.cursor.static_side,
            current = self.cursor.current,
            remaining = self.queue.len(),
            "Turn settled"
        );
        vec![
            Effect::RemovePage { page: page.id() },
            Effect::SetImage {
                surface: Surface::Left,
                face: left,
            },
            Effect::SetImage {
                surface: Surface::Right,
                face: right,
            },
        ]
    }

    /// Jump straight to `page`; only while nothing is turning.
    pub fn set_page(&mut self, page: i64) -> Vec<Effect> {
        if !self.queue.is_empty() || self.drag.is_some() {
            debug!(page, in_flight = self.queue.len(), "Jump rejected while turning");
            return Vec::new();
        }
        let index = normalize_index(page, self.images.len(), self.wrap_around);
        self.cursor = CursorState::at(index);
        info!(requested = page, index, "Jumped to page");
        self.rest_faces(index)
    }

    fn rest_faces(&self, index: i64) -> Vec<Effect> {
        vec![
            Effect::SetImage {
                surface: Surface::Left,
                face: self.images.left_face(index),
            },
            Effect::SetImage {
                surface: Surface::Right,
                face: self.images.right_face(index),
            },
        ]
    }

    fn settle_plan(&self, page: &TurningPage, speed: f64) -> SettlePlan {
        SettlePlan::for_page(page, speed, self.flip_duration, self.flick_speed_factor)
    }

    pub fn current_image(&self) -> i64 {
        self.cursor.current
    }

    pub fn static_side_image(&self) -> i64 {
        self.cursor.static_side
    }

    pub fn is_turning_forwards(&self) -> bool {
        self.turning_forwards
    }

    pub fn is_turning_backwards(&self) -> bool {
        self.turning_backwards
    }

    pub fn is_turning(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Highest fully settled page id.
    pub fn last_completed_id(&self) -> Option<PageId> {
        self.next_expected.0.checked_sub(1).map(PageId)
    }

    pub fn dragged_page(&self) -> Option<PageId> {
        self.drag.as_ref().map(DragController::page)
    }

    pub fn queue(&self) -> &TurnQueue {
        &self.queue
    }

    pub fn images(&self) -> &ImageSequence {
        &self.images
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            current_image: self.cursor.current,
            static_side_image: self.cursor.static_side,
            image_count: self.images.len(),
            wrap_around: self.wrap_around,
            turning_forwards: self.turning_forwards,
            turning_backwards: self.turning_backwards,
            dragging: self.dragged_page(),
            last_completed_id: self.last_completed_id(),
            queue: self.queue.pages().to_vec(),
        }
    }

    pub fn apply_command(&mut self, command: BookCommand) -> BookEvent {
        let action = command.action();
        let effects = match command {
            BookCommand::GetSnapshot => Vec::new(),
            BookCommand::Next => self.next(),
            BookCommand::Previous => self.previous(),
            BookCommand::SetPage { page } => self.set_page(page),
            BookCommand::DragTurn {
                direction,
                origin_x,
            } => self.drag_turn(direction, origin_x),
            BookCommand::PointerDown { x } => self.pointer_down(x),
            BookCommand::PointerMove { x } => self.drag_move(x),
            BookCommand::PointerUp => self.drag_release(),
            BookCommand::AnimationStep { page, angle } => self.animation_step(page, angle),
            BookCommand::TurnComplete { page } => self.turn_complete(page),
        };
        BookEvent {
            action,
            effects,
            snapshot: self.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Phase;
    use crate::sequence::{CoverSide, Face, ImageRef};

    fn images(len: usize) -> ImageSequence {
        ImageSequence::new(
            (0..len)
                .map(|i| ImageRef::new(format!("{i:03}.jpg")))
                .collect(),
        )
    }

    fn book(len: usize, wrap_around: bool) -> Book {
        let config = BookConfig {
            wrap_around,
            ..BookConfig::default()
        };
        Book::new(images(len), &config)
    }

    fn started_page(effects: &[Effect]) -> Option<PageId> {
        effects.iter().find_map(|effect| match effect {
            Effect::InsertPage { page } => Some(*page),
            _ => None,
        })
    }

    fn surface_face(effects: &[Effect], wanted: Surface) -> Option<Face> {
        effects.iter().rev().find_map(|effect| match effect {
            Effect::SetImage { surface, face } if *surface == wanted => Some(*face),
            _ => None,
        })
    }

    #[test]
    fn closed_book_opens_on_the_front_cover() {
        let book = book(4, false);
        assert_eq!(book.current_image(), -1);
        let effects = book.open();
        assert_eq!(surface_face(&effects, Surface::Left), Some(Face::Empty));
        assert_eq!(
            surface_face(&effects, Surface::Right),
            Some(Face::Cover(CoverSide::Front))
        );
    }

    #[test]
    fn next_queues_an_animated_page_and_advances_optimistically() {
        let mut book = book(4, false);
        let effects = book.next();
        let id = started_page(&effects).expect("page created");
        assert_eq!(book.current_image(), 0);
        assert_eq!(book.static_side_image(), -1);
        assert!(book.is_turning_forwards());
        assert_eq!(book.queue().get(id).map(TurningPage::phase), Some(Phase::NextStart));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Animate(plan) if plan.page == id && plan.to == -180.0
        )));
    }

    #[test]
    fn opposite_direction_is_rejected_while_turning() {
        let mut book = book(4, false);
        book.set_page(2);
        assert!(!book.next().is_empty());
        assert!(book.previous().is_empty());
        assert_eq!(book.queue().len(), 1);
        assert!(!book.is_turning_backwards());
    }

    #[test]
    fn completing_in_order_settles_the_static_side() {
        let mut book = book(4, false);
        book.set_page(1);
        let id = started_page(&book.next()).expect("page created");
        let effects = book.turn_complete(id);
        assert!(effects.contains(&Effect::RemovePage { page: id }));
        assert_eq!(surface_face(&effects, Surface::Left), Some(Face::Image(2)));
        assert_eq!(surface_face(&effects, Surface::Right), Some(Face::Image(2)));
        assert_eq!(book.static_side_image(), 2);
        assert!(!book.is_turning());
        assert!(!book.is_turning_forwards());
        assert_eq!(book.last_completed_id(), Some(id));
    }

    #[test]
    fn later_middle_turn_keeps_covered_left_side() {
        let mut book = book(4, false);
        let first = book.next();
        assert_eq!(surface_face(&first, Surface::Left), Some(Face::Empty));
        let second = book.next();
        assert_eq!(surface_face(&second, Surface::Left), None);
        assert_eq!(surface_face(&second, Surface::Right), Some(Face::Image(1)));
    }

    #[test]
    fn early_completion_merges_and_defers_state() {
        let mut book = book(5, false);
        book.set_page(0);
        let p1 = started_page(&book.next()).expect("first page");
        let p2 = started_page(&book.next()).expect("second page");

        let effects = book.turn_complete(p2);
        assert_eq!(effects[0], Effect::RemovePage { page: p2 });
        assert_eq!(book.queue().len(), 1);
        assert_eq!(book.queue().front().map(TurningPage::skip_count), Some(2));
        assert_eq!(book.last_completed_id(), None);
        assert_eq!(book.static_side_image(), 0);

        book.turn_complete(p1);
        assert_eq!(book.static_side_image(), 2);
        assert_eq!(book.current_image(), 2);
        assert_eq!(book.last_completed_id(), Some(p2));
        assert!(!book.is_turning_forwards());
    }

    #[test]
    fn drag_moves_the_page_and_raises_it_past_halfway() {
        let mut book = book(4, false);
        book.set_page(1);
        assert!(!book.pointer_down(100.0).is_empty());
        let id = book.dragged_page().expect("dragging");

        let effects = book.drag_move(60.0);
        assert_eq!(effects, vec![Effect::SetRotation { page: id, angle: -36.0 }]);

        let effects = book.drag_move(-20.0);
        assert!(effects.contains(&Effect::RaisePage { page: id }));

        assert!(book.next().is_empty(), "commands wait for the drag");
        let released = book.drag_release();
        match released.as_slice() {
            [Effect::Animate(plan)] => {
                assert_eq!(plan.page, id);
                assert_eq!(plan.to, -180.0);
            }
            other => panic!("expected one animation, got {other:?}"),
        }
        assert!(book.dragged_page().is_none());
    }

    #[test]
    fn pointer_on_the_left_half_turns_backwards() {
        let mut book = book(4, false);
        book.set_page(2);
        book.pointer_down(-80.0);
        let id = book.dragged_page().expect("dragging");
        assert_eq!(book.queue().get(id).map(TurningPage::direction), Some(Direction::Previous));
        assert_eq!(book.current_image(), 1);
        let effects = book.drag_move(0.0);
        assert_eq!(effects, vec![Effect::SetRotation { page: id, angle: -90.0 }]);
    }

    #[test]
    fn pointer_turning_can_be_disabled() {
        let config = BookConfig {
            page_buttons: false,
            ..BookConfig::default()
        };
        let mut book = Book::new(images(3), &config);
        assert!(book.pointer_down(50.0).is_empty());
        assert!(!book.drag_turn(Direction::Next, 50.0).is_empty());
    }

    #[test]
    fn spine_origin_and_second_drag_are_rejected() {
        let mut book = book(4, false);
        assert!(book.drag_turn(Direction::Next, 0.0).is_empty());
        assert!(!book.drag_turn(Direction::Next, 40.0).is_empty());
        assert!(book.drag_turn(Direction::Next, 40.0).is_empty());
        assert_eq!(book.queue().len(), 1);
    }

    #[test]
    fn release_without_drag_is_a_no_op() {
        let mut book = book(4, false);
        assert!(book.drag_release().is_empty());
        assert!(book.drag_move(10.0).is_empty());
    }

    #[test]
    fn set_page_is_rejected_mid_turn_and_normalizes_otherwise() {
        let mut turning = book(5, false);
        turning.next();
        assert!(turning.set_page(3).is_empty());
        assert_eq!(turning.current_image(), 0);

        let mut idle = book(5, false);
        idle.set_page(42);
        assert_eq!(idle.current_image(), 5);
        assert_eq!(idle.static_side_image(), 5);

        let mut wrapping = book(5, true);
        let effects = wrapping.set_page(-1);
        assert_eq!(wrapping.current_image(), 4);
        assert_eq!(surface_face(&effects, Surface::Left), Some(Face::Image(4)));
    }

    #[test]
    fn empty_and_single_image_books_reject_turns() {
        let mut empty = book(0, false);
        assert!(empty.next().is_empty());
        assert!(empty.previous().is_empty());

        let mut single = book(1, true);
        assert!(single.next().is_empty());
    }

    #[test]
    fn animation_steps_are_bounded_by_the_page_ahead() {
        let mut book = book(6, false);
        book.set_page(1);
        let first = started_page(&book.next()).expect("first page");
        let second = started_page(&book.next()).expect("second page");
        book.animation_step(first, -10.0);
        let effects = book.animation_step(second, -40.0);
        assert_eq!(
            effects,
            vec![Effect::SetRotation {
                page: second,
                angle: -9.75
            }]
        );
    }

    #[test]
    fn commands_report_action_and_snapshot() {
        let mut book = book(3, false);
        let event = book.apply_command(BookCommand::Next);
        assert_eq!(event.action, "book_next");
        assert!(!event.effects.is_empty());
        assert_eq!(event.snapshot.current_image, 0);
        assert_eq!(event.snapshot.queue.len(), 1);
        assert!(event.snapshot.turning_forwards);

        let event = book.apply_command(BookCommand::GetSnapshot);
        assert_eq!(event.action, "book_get_snapshot");
        assert!(event.effects.is_empty());
    }
}
