//! Capped, deduplicated, insertion-ordered selections
//!
//! Genres use a set capped at three entries; authors, liked books and reading
//! formats use uncapped sets. An add that would exceed the cap is rejected and
//! the set is left exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which selection a set holds (used in error reporting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Genres,
    Authors,
    LikedBooks,
    Formats,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionKind::Genres => "genres",
            SelectionKind::Authors => "authors",
            SelectionKind::LikedBooks => "liked books",
            SelectionKind::Formats => "reading formats",
        };
        f.write_str(name)
    }
}

/// Rejected selection mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Cannot select more than {capacity} {kind}")]
    CapacityExceeded {
        kind: SelectionKind,
        capacity: usize,
    },
}

/// Result of a successful `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The value was appended
    Added,
    /// The value was already present; nothing changed
    AlreadyPresent,
}

/// Ordered set of user-picked values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSet<T> {
    kind: SelectionKind,
    items: Vec<T>,
    capacity: Option<usize>,
}

impl<T: PartialEq + Clone> SelectionSet<T> {
    /// Uncapped set
    pub fn unbounded(kind: SelectionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            capacity: None,
        }
    }

    /// Set holding at most `capacity` values
    pub fn capped(kind: SelectionKind, capacity: usize) -> Self {
        Self {
            kind,
            items: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Append `value` unless it is already present
    ///
    /// Duplicates are checked before the cap, so re-adding a present value to
    /// a full set is still a no-op rather than a capacity error.
    pub fn add(&mut self, value: T) -> Result<AddOutcome, SelectionError> {
        if self.items.contains(&value) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        if let Some(capacity) = self.capacity {
            if self.items.len() >= capacity {
                return Err(SelectionError::CapacityExceeded {
                    kind: self.kind,
                    capacity,
                });
            }
        }

        self.items.push(value);
        Ok(AddOutcome::Added)
    }

    /// Remove `value` if present; returns whether anything was removed
    pub fn remove(&mut self, value: &T) -> bool {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot in insertion order
    pub fn to_list(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .map(|capacity| self.items.len() >= capacity)
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
