//! Pagination types
//!
//! Cursor bookkeeping shared by the page loop.

use crate::types::Id;

/// Result of inspecting a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again, resuming after this identifier
    Continue(Id),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The cursor to resume from, if any
    pub fn cursor(&self) -> Option<Id> {
        match self {
            Self::Continue(id) => Some(*id),
            Self::Done => None,
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Cursor for the next fetch; `None` requests the first page
    pub cursor: Option<Id>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page and where to go next
    pub fn advance(&mut self, next: NextPage) {
        self.pages += 1;
        self.cursor = next.cursor();
        self.done = next.is_done();
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
