//! Page-turning engine for an image book.
//!
//! The crate owns the turn state machine: which image goes on which visual
//! surface, how a drag maps to a rotation angle, how several in-flight turns
//! are kept from overtaking one another, and how turn completions that fire
//! out of creation order are reconciled. Presentation is left to the caller,
//! which applies the [`Effect`]s returned by every [`Book`] operation.

pub mod animation;
pub mod bindings;
pub mod book;
pub mod bounds;
pub mod browse;
pub mod config;
pub mod cursor;
pub mod drag;
pub mod effect;
pub mod page;
pub mod queue;
pub mod reconcile;
pub mod scene;
mod scheduler;
pub mod sequence;

pub use animation::{AnimationEvent, Animator, Easing, SettlePlan};
pub use book::{Book, BookCommand, BookEvent, BookSnapshot};
pub use config::BookConfig;
pub use effect::{Effect, RenderSurface, Surface, dispatch};
pub use page::{Direction, PageId, Phase, TurningPage};
pub use scene::Scene;
pub use sequence::{CoverSide, Face, ImageRef, ImageSequence};
