use crate::animation::SettlePlan;
use crate::page::PageId;
use crate::sequence::Face;
use serde::Serialize;
use ts_rs::TS;

/// A named visual slot of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Surface {
    Left,
    Right,
    PageFront(PageId),
    PageBack(PageId),
}

/// Describes presentation work that must be performed outside the state
/// machine.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Effect {
    /// Create an element for a new turning page, beneath the pages already
    /// in flight.
    InsertPage { page: PageId },
    SetImage { surface: Surface, face: Face },
    SetRotation { page: PageId, angle: f64 },
    /// Move a page element to the top of its paint stack.
    RaisePage { page: PageId },
    RemovePage { page: PageId },
    /// Start the settle animation; the host reports back every step and the
    /// completion.
    Animate(SettlePlan),
}

/// The presentation layer the book draws on.
pub trait RenderSurface {
    fn insert_page(&mut self, page: PageId);
    fn set_image(&mut self, surface: Surface, face: Face);
    fn set_rotation(&mut self, page: PageId, angle: f64);
    fn set_z_order_last(&mut self, page: PageId);
    fn remove_page(&mut self, page: PageId);
}

/// Apply effects to a surface, returning the animations the host must run.
pub fn dispatch<S: RenderSurface + ?Sized>(effects: &[Effect], surface: &mut S) -> Vec<SettlePlan> {
    let mut animations = Vec::new();
    for effect in effects {
        match effect {
            Effect::InsertPage { page } => surface.insert_page(*page),
            Effect::SetImage { surface: slot, face } => surface.set_image(*slot, *face),
            Effect::SetRotation { page, angle } => surface.set_rotation(*page, *angle),
            Effect::RaisePage { page } => surface.set_z_order_last(*page),
            Effect::RemovePage { page } => surface.remove_page(*page),
            Effect::Animate(plan) => animations.push(*plan),
        }
    }
    animations
}
