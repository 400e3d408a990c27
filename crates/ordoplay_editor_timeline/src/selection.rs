// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-item selection and the edit bracket around drags.

use crate::error::{Result, TimelineError};

/// Selected row, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection(Option<usize>);

impl Selection {
    /// Nothing selected
    pub const NONE: Self = Self(None);

    /// Selected row
    pub fn get(&self) -> Option<usize> {
        self.0
    }

    /// Whether `index` is the selected row
    pub fn is(&self, index: usize) -> bool {
        self.0 == Some(index)
    }

    /// Select a row
    pub fn select(&mut self, index: usize) {
        self.0 = Some(index);
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Keep the selection on the same item after row `removed` was deleted
    /// and `remaining` rows are left.
    pub fn on_removed(&mut self, removed: usize, remaining: usize) {
        self.0 = match self.0 {
            Some(selected) if selected == removed => None,
            Some(selected) if selected > removed => Some(selected - 1),
            other => other,
        };
        if matches!(self.0, Some(selected) if selected >= remaining) {
            self.0 = None;
        }
    }
}

impl From<Option<usize>> for Selection {
    fn from(index: Option<usize>) -> Self {
        Self(index)
    }
}

/// Open/closed edit bracket. Strictly paired, never nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSession {
    open: Option<usize>,
}

impl EditSession {
    /// Open the bracket on `index`
    pub fn begin(&mut self, index: usize) -> Result<()> {
        if let Some(open) = self.open {
            return Err(TimelineError::EditSessionOpen(open));
        }
        self.open = Some(index);
        Ok(())
    }

    /// Close the bracket, returning the row it was open on
    pub fn end(&mut self) -> Option<usize> {
        self.open.take()
    }

    /// Row under edit
    pub fn current(&self) -> Option<usize> {
        self.open
    }

    /// Whether a bracket is open
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}
