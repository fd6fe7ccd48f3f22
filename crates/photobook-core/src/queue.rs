//! Pages currently in flight, oldest first.

use crate::page::{PageId, TurningPage};

/// Insertion-ordered collection of turning pages. Since ids are handed out
/// in creation order, the queue is also ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnQueue {
    pages: Vec<TurningPage>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[TurningPage] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurningPage> {
        self.pages.iter()
    }

    /// Oldest page in flight.
    pub fn front(&self) -> Option<&TurningPage> {
        self.pages.first()
    }

    /// Most recently pushed page.
    pub fn newest(&self) -> Option<&TurningPage> {
        self.pages.last()
    }

    pub fn push(&mut self, page: TurningPage) {
        debug_assert!(
            self.newest().is_none_or(|last| last.id() < page.id()),
            "turn queue must stay ordered by id"
        );
        self.pages.push(page);
    }

    pub fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id() == id)
    }

    pub fn get(&self, id: PageId) -> Option<&TurningPage> {
        self.pages.iter().find(|page| page.id() == id)
    }

    pub fn get_mut(&mut self, id: PageId) -> Option<&mut TurningPage> {
        self.pages.iter_mut().find(|page| page.id() == id)
    }

    /// Page immediately ahead of `index` in the queue.
    pub fn ahead_of(&self, index: usize) -> Option<&TurningPage> {
        index.checked_sub(1).and_then(|prev| self.pages.get(prev))
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [TurningPage] {
        &mut self.pages
    }

    /// Remove the page at `index`, which must be in range.
    pub(crate) fn remove_at(&mut self, index: usize) -> TurningPage {
        self.pages.remove(index)
    }
}
