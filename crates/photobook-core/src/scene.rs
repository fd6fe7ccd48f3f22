//! In-memory render surface: what a viewer would currently see.

use crate::effect::{Effect, RenderSurface, Surface, dispatch};
use crate::page::PageId;
use crate::sequence::Face;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneElement {
    pub page: PageId,
    pub front: Face,
    pub back: Face,
    pub angle: f64,
}

impl SceneElement {
    /// Face currently facing the viewer.
    pub fn visible_face(&self) -> Face {
        if self.angle < -90.0 {
            self.back
        } else {
            self.front
        }
    }
}

/// Static sides plus the turning page elements in paint order; the last
/// element paints on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub left: Face,
    pub right: Face,
    pub pages: Vec<SceneElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, page: PageId) -> Option<&SceneElement> {
        self.pages.iter().find(|el| el.page == page)
    }

    /// Apply effects, returning the animations requested among them.
    pub fn apply(&mut self, effects: &[Effect]) -> Vec<crate::animation::SettlePlan> {
        dispatch(effects, self)
    }

    /// Topmost page element, if any.
    pub fn topmost(&self) -> Option<&SceneElement> {
        self.pages.last()
    }

    fn element_mut(&mut self, page: PageId) -> Option<&mut SceneElement> {
        self.pages.iter_mut().find(|el| el.page == page)
    }
}

impl RenderSurface for Scene {
    fn insert_page(&mut self, page: PageId) {
        self.pages.insert(
            0,
            SceneElement {
                page,
                front: Face::Empty,
                back: Face::Empty,
                angle: 0.0,
            },
        );
    }

    fn set_image(&mut self, surface: Surface, face: Face) {
        match surface {
            Surface::Left => self.left = face,
            Surface::Right => self.right = face,
            Surface::PageFront(page) => match self.element_mut(page) {
                Some(el) => el.front = face,
                None => trace!(%page, "Front face for unknown element"),
            },
            Surface::PageBack(page) => match self.element_mut(page) {
                Some(el) => el.back = face,
                None => trace!(%page, "Back face for unknown element"),
            },
        }
    }

    fn set_rotation(&mut self, page: PageId, angle: f64) {
        if let Some(el) = self.element_mut(page) {
            el.angle = angle;
        }
    }

    fn set_z_order_last(&mut self, page: PageId) {
        if let Some(idx) = self.pages.iter().position(|el| el.page == page) {
            let el = self.pages.remove(idx);
            self.pages.push(el);
        }
    }

    fn remove_page(&mut self, page: PageId) {
        self.pages.retain(|el| el.page != page);
    }
}
