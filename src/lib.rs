//!
//! # rasterpad
//!
//! `rasterpad` is the layer-composited raster engine at the core of an interactive pixel
//! editor: a pixel-buffer data model, an alpha-compositing engine with a dirty-tracked
//! cache, a hybrid patch/snapshot undo history, and a selection pipeline for moving,
//! scaling, rotating and flipping rectangular regions of the canvas.
//!
//! The crate deliberately stops at the pixel model. The pieces that decide *where* to
//! paint (brushes, fills, shape tools), the surface that puts composited pixels on
//! screen, and the persistence layer that stores serialized documents are all external
//! collaborators: tools drive the mutation API on `CanvasEditor`, renderers consume its
//! read API, and persistence exchanges plain `SerializedCanvas` descriptions with it.
//! A single injected notifier hook reports committed changes; the core never performs
//! I/O and never waits on anything.
//!
//! Edits group naturally into gestures. Bracketing a run of pixel writes between
//! `start_batch` and `end_batch` collapses it into a single undo step, recorded either
//! as a sparse per-pixel patch or as a full snapshot depending on the canvas size — this
//! is what keeps one brush stroke one `undo()` away without copying the whole canvas for
//! every stroke on large documents.
//!
#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;

/// A pixel models a single colour sample; a pixel buffer is the packed raster one layer owns
pub mod pixel;

/// Layers and the ordered stack that owns them
pub mod layer;

/// Flattening the visible layers into a single raster
pub mod compose;

/// The undo/redo stack and its patch/snapshot entries
pub mod history;

/// The editor aggregate: the mutation and read surface the surrounding system talks to
pub mod edit;

/// Rectangular selections and the transforms on them
pub mod select;

pub use self::pixel::*;
pub use self::layer::*;
pub use self::compose::*;
pub use self::history::*;
pub use self::edit::*;
pub use self::select::*;
