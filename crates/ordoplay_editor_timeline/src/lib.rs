// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline/sequencer widget for OrdoPlay Editor.
//!
//! An immediate-mode track view: one row per item, each item a frame range
//! drawn as a bar that can be moved or resized by its edges. Around the rows
//! sit a frame ruler with a scrubbable playhead, a legend column with
//! per-row buttons, and a horizontal scrollbar whose thumb pans and zooms.
//!
//! ## Architecture
//!
//! - [`coords`]: frame/pixel mapping, smoothed zoom, ruler ticks
//! - [`store`]: the [`SequenceProvider`] interface and [`MediaSequence`]
//! - [`interaction`]: the pointer state machine run once per tick
//! - [`layout`], [`draw`], [`render`]: geometry, the render driver and
//!   the passive [`Surface`] it paints through
//! - [`selection`]: selected row and the edit bracket around drags
//! - [`sequencer`]: the [`Sequencer`] widget tying it all together
//!
//! The widget is polled: hosts call [`Sequencer::update`] with an input
//! snapshot every tick, or [`Sequencer::show`] inside an `egui::Ui`.

pub mod config;
pub mod coords;
pub mod draw;
pub mod error;
pub mod input;
pub mod interaction;
pub mod item;
pub mod layout;
pub mod options;
pub mod render;
pub mod selection;
pub mod sequencer;
pub mod store;

pub use config::{SequencerColors, SequencerConfig};
pub use coords::{Frame, FrameBounds, FrameMapping, TickKind, TickSpacing, Zoom};
pub use draw::{render_timeline, CustomDrawRequest, DrawFrame};
pub use error::{Result, TimelineError};
pub use input::SequencerInput;
pub use interaction::{Interaction, InteractionState};
pub use item::{ItemId, ItemRange, MediaDescriptor, MediaKind, TrackItem};
pub use layout::{EdgeMask, ItemBar, ScrollbarThumb, SequencerLayout};
pub use options::SequencerOptions;
pub use render::{
    CompactDrawRegion, CustomDrawRegion, DrawCommand, DrawList, PainterSurface, Surface,
};
pub use selection::{EditSession, Selection};
pub use sequencer::{Sequencer, SequencerView};
pub use store::{MediaSequence, SequenceProvider};
