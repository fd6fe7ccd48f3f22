//! Property-based invariant tests for the turn engine.
//!
//! 1. The cursor never leaves `[-1, n]` without wrap-around
//! 2. Forward and backward busy flags are never both set
//! 3. The turn queue stays ordered by id and holds a single direction
//! 4. Pages behind the oldest one never pass the page ahead, and sit
//!    inside their rotation bounds or pinned at rest when those are empty
//! 5. Once every turn completes, in any order, the static side catches up
//!    with the cursor and the book is idle

use photobook_core::bounds::rotation_bounds;
use photobook_core::{Book, BookConfig, Direction, ImageRef, ImageSequence, PageId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Step(usize, f64),
    Complete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        3 => Just(Op::Previous),
        2 => (0usize..8, 0.0f64..60.0).prop_map(|(idx, delta)| Op::Step(idx, delta)),
        3 => (0usize..8).prop_map(Op::Complete),
    ]
}

fn book(len: usize, wrap_around: bool, start_page: i64) -> Book {
    let images = ImageSequence::new(
        (0..len)
            .map(|i| ImageRef::new(format!("{i}.png")))
            .collect(),
    );
    let config = BookConfig {
        wrap_around,
        start_page: Some(start_page),
        ..BookConfig::default()
    };
    Book::new(images, &config)
}

fn page_at(book: &Book, idx: usize) -> Option<PageId> {
    let pages = book.queue().pages();
    if pages.is_empty() {
        None
    } else {
        Some(pages[idx % pages.len()].id())
    }
}

fn apply(book: &mut Book, op: &Op) {
    match op {
        Op::Next => {
            book.next();
        }
        Op::Previous => {
            book.previous();
        }
        Op::Step(idx, delta) => {
            // Animations only ever move a page towards its target.
            let pages = book.queue().pages();
            if pages.is_empty() {
                return;
            }
            let page = &pages[idx % pages.len()];
            let angle = match page.direction() {
                Direction::Next => page.angle() - delta,
                Direction::Previous => page.angle() + delta,
            };
            let id = page.id();
            book.animation_step(id, angle);
        }
        Op::Complete(idx) => {
            if let Some(id) = page_at(book, *idx) {
                book.turn_complete(id);
            }
        }
    }
}

fn check_invariants(book: &Book, len: usize, wrap_around: bool) -> Result<(), TestCaseError> {
    let n = len as i64;
    if wrap_around {
        prop_assert!((0..n).contains(&book.current_image()));
        prop_assert!((0..n).contains(&book.static_side_image()));
    } else {
        prop_assert!((-1..=n).contains(&book.current_image()));
        prop_assert!((-1..=n).contains(&book.static_side_image()));
    }
    prop_assert!(!(book.is_turning_forwards() && book.is_turning_backwards()));

    let pages = book.queue().pages();
    for pair in pages.windows(2) {
        prop_assert!(pair[0].id() < pair[1].id());
        prop_assert_eq!(pair[0].direction(), pair[1].direction());
        let (ahead, behind) = (&pair[0], &pair[1]);
        match ahead.direction() {
            Direction::Next => prop_assert!(
                behind.angle() >= ahead.angle(),
                "page {} at {} passed page {} at {}",
                behind.id(),
                behind.angle(),
                ahead.id(),
                ahead.angle()
            ),
            Direction::Previous => prop_assert!(
                behind.angle() <= ahead.angle(),
                "page {} at {} passed page {} at {}",
                behind.id(),
                behind.angle(),
                ahead.id(),
                ahead.angle()
            ),
        }
    }
    if let Some(front) = pages.first() {
        match front.direction() {
            Direction::Next => prop_assert!(book.is_turning_forwards()),
            Direction::Previous => prop_assert!(book.is_turning_backwards()),
        }
    } else {
        prop_assert!(!book.is_turning_forwards() && !book.is_turning_backwards());
    }
    for page in pages {
        prop_assert!(page.skip_count() >= 1);
        prop_assert!((-180.0..=0.0).contains(&page.angle()));
        let bounds = rotation_bounds(book.queue(), page.direction(), page.id());
        prop_assert!(
            bounds.contains(page.angle()) || (bounds.is_empty() && page.angle() == bounds.rest),
            "page {} at {} outside {:?}",
            page.id(),
            page.angle(),
            bounds
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn cursor_and_flags_stay_consistent(
        len in 2usize..8,
        start in -1i64..9,
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut book = book(len, false, start);
        check_invariants(&book, len, false)?;
        for op in &ops {
            apply(&mut book, op);
            check_invariants(&book, len, false)?;
        }
    }

    #[test]
    fn wrapping_cursor_stays_in_range(
        len in 2usize..8,
        start in -10i64..10,
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut book = book(len, true, start);
        for op in &ops {
            apply(&mut book, op);
            check_invariants(&book, len, true)?;
        }
    }

    #[test]
    fn draining_completions_in_any_order_settles_on_the_cursor(
        len in 2usize..8,
        wrap_around in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 0..60),
        drain in prop::collection::vec(0usize..8, 0..16),
    ) {
        let mut book = book(len, wrap_around, 0);
        for op in &ops {
            apply(&mut book, op);
        }
        let mut picks = drain.into_iter();
        while book.is_turning() {
            let idx = picks.next().unwrap_or(0);
            let before = book.queue().len();
            let id = page_at(&book, idx).expect("queue not empty");
            book.turn_complete(id);
            prop_assert_eq!(book.queue().len(), before - 1);
            check_invariants(&book, len, wrap_around)?;
        }
        prop_assert_eq!(book.static_side_image(), book.current_image());
        prop_assert!(!book.is_turning_forwards());
        prop_assert!(!book.is_turning_backwards());
    }

    #[test]
    fn alternating_commands_never_mix_directions(
        len in 2usize..8,
        rounds in 1usize..30,
    ) {
        let mut book = book(len, false, -1);
        for round in 0..rounds {
            if round % 2 == 0 {
                book.next();
            } else {
                book.previous();
            }
            check_invariants(&book, len, false)?;
            let directions: Vec<_> = book.queue().iter().map(|page| page.direction()).collect();
            prop_assert!(directions.windows(2).all(|pair| pair[0] == pair[1]));
        }
    }
}
