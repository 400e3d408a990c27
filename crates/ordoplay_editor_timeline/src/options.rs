// SPDX-License-Identifier: MIT OR Apache-2.0
//! Feature switches for the sequencer widget.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitset of enabled widget features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SequencerOptions(u32);

impl SequencerOptions {
    /// Nothing enabled
    pub const NONE: Self = Self(0);
    /// Click/drag in the header moves the playhead
    pub const CHANGE_FRAME: Self = Self(1);
    /// Duplicate button in the legend
    pub const ADD: Self = Self(1 << 2);
    /// Delete button in the legend
    pub const DEL: Self = Self(1 << 3);
    /// Copy/paste labels in the header
    pub const COPYPASTE: Self = Self(1 << 4);
    /// Item start/end can be dragged
    pub const EDIT_STARTEND: Self = Self(1 << 1);
    /// Everything except copy/paste
    pub const EDIT_ALL: Self =
        Self(Self::ADD.0 | Self::DEL.0 | Self::EDIT_STARTEND.0 | Self::CHANGE_FRAME.0);

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SequencerOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SequencerOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SequencerOptions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_all() {
        let options = SequencerOptions::EDIT_ALL;
        assert!(options.contains(SequencerOptions::DEL));
        assert!(options.contains(SequencerOptions::ADD));
        assert!(options.contains(SequencerOptions::EDIT_STARTEND));
        assert!(options.contains(SequencerOptions::CHANGE_FRAME));
        assert!(!options.contains(SequencerOptions::COPYPASTE));
    }

    #[test]
    fn test_combine() {
        let mut options = SequencerOptions::NONE;
        options |= SequencerOptions::COPYPASTE;
        let options = options | SequencerOptions::DEL;
        assert_eq!(options.bits(), 0b11000);
        assert_eq!(options & SequencerOptions::DEL, SequencerOptions::DEL);
        assert!(SequencerOptions::NONE.contains(SequencerOptions::NONE));
    }
}
