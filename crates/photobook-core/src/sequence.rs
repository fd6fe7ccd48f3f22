//! The ordered page images and the faces they are shown on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageRef {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CoverSide {
    Front,
    Back,
}

/// What a visual surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Face {
    /// A page image by index.
    Image(usize),
    /// The cover board, drawn with cover art when configured.
    Cover(CoverSide),
    /// Nothing at all, e.g. beside a closed book.
    #[default]
    Empty,
}

impl Face {
    pub fn is_cover(self) -> bool {
        matches!(self, Face::Cover(_))
    }
}

/// Immutable, indexable list of page images plus optional cover art.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSequence {
    images: Vec<ImageRef>,
    front_cover: Option<ImageRef>,
    back_cover: Option<ImageRef>,
}

impl ImageSequence {
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self {
            images,
            front_cover: None,
            back_cover: None,
        }
    }

    pub fn with_covers(mut self, front: Option<ImageRef>, back: Option<ImageRef>) -> Self {
        self.front_cover = front;
        self.back_cover = back;
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter()
    }

    pub fn cover(&self, side: CoverSide) -> Option<&ImageRef> {
        match side {
            CoverSide::Front => self.front_cover.as_ref(),
            CoverSide::Back => self.back_cover.as_ref(),
        }
    }

    /// The image to draw for a face. `None` means a plain board or nothing.
    pub fn resolve(&self, face: Face) -> Option<&ImageRef> {
        match face {
            Face::Image(idx) => self.images.get(idx),
            Face::Cover(side) => self.cover(side),
            Face::Empty => None,
        }
    }

    /// Face for a real page index; anything outside `[0, n - 1]` shows nothing.
    pub fn image_face(&self, index: i64) -> Face {
        match usize::try_from(index) {
            Ok(idx) if idx < self.images.len() => Face::Image(idx),
            _ => Face::Empty,
        }
    }

    /// Face of the static left side for a cursor position. A book closed at
    /// the end shows its back cover on the left.
    pub fn left_face(&self, index: i64) -> Face {
        if index == self.images.len() as i64 {
            Face::Cover(CoverSide::Back)
        } else {
            self.image_face(index)
        }
    }

    /// Face of the static right side for a cursor position. A book closed at
    /// the start shows its front cover on the right.
    pub fn right_face(&self, index: i64) -> Face {
        if index == -1 {
            Face::Cover(CoverSide::Front)
        } else {
            self.image_face(index)
        }
    }
}
