// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline errors.

use thiserror::Error;

/// Errors raised by the fallible parts of the timeline API.
///
/// The interaction path never returns these; it clamps instead.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Item index past the end of the store
    #[error("Item index {index} out of range (store holds {count} items)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of items in the store
        count: usize,
    },

    /// `begin_edit` while another edit is still open
    #[error("Edit session already open on item {0}")]
    EditSessionOpen(usize),

    /// Range with start after end
    #[error("Invalid frame range {start}..={end}")]
    InvalidRange {
        /// Range start
        start: i32,
        /// Range end
        end: i32,
    },

    /// Config values that cannot be used together
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config parse failure
    #[error("Config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Config serialization failure
    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] ron::Error),
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;
