use crate::layer::*;
use crate::pixel::*;

use std::collections::HashMap;

///
/// Identifies one pixel touched during a batch: the layer it is on and its coordinates
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatchKey {
    pub layer:  usize,
    pub x:      i32,
    pub y:      i32,
}

///
/// The colour a patched pixel held before the batch and the colour it ended the batch with
///
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelChange {
    pub before: Rgba,
    pub after:  Rgba,
}

///
/// One committed step on the undo stack
///
/// Patches record only the pixels a batch actually touched, each with its own before and
/// after colour, so memory stays bounded by the edit rather than the canvas. Snapshots hold
/// complete copies of the stack from both sides of the change: anything that alters the
/// layer topology cannot be represented compactly as a patch.
///
/// Each entry carries everything needed to step over it in either direction by itself —
/// undoing or redoing never consults a neighbouring entry.
///
#[derive(Clone, Debug)]
pub enum HistoryEntry {
    /// A sparse set of per-pixel changes
    Patch {
        writes: HashMap<PatchKey, PixelChange>,
    },

    /// Complete stack states from before and after the change
    Snapshot {
        before: LayerStack,
        after:  LayerStack,
    },
}

///
/// The kind of a committed history entry
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Patch,
    Snapshot,
}

impl HistoryEntry {
    ///
    /// The kind of this entry
    ///
    pub fn kind(&self) -> EntryKind {
        match self {
            HistoryEntry::Patch { .. }      => EntryKind::Patch,
            HistoryEntry::Snapshot { .. }   => EntryKind::Snapshot,
        }
    }

    ///
    /// Rewinds a stack to the state this entry started from
    ///
    pub (crate) fn apply_before(&self, stack: &mut LayerStack) {
        match self {
            HistoryEntry::Patch { writes } => {
                for (key, change) in writes.iter() {
                    stack.restore_pixel(key.x, key.y, change.before, key.layer);
                }
            }

            HistoryEntry::Snapshot { before, .. } => {
                *stack = before.clone();
            }
        }
    }

    ///
    /// Advances a stack to the state this entry ended with
    ///
    pub (crate) fn apply_after(&self, stack: &mut LayerStack) {
        match self {
            HistoryEntry::Patch { writes } => {
                for (key, change) in writes.iter() {
                    stack.restore_pixel(key.x, key.y, change.after, key.layer);
                }
            }

            HistoryEntry::Snapshot { after, .. } => {
                *stack = after.clone();
            }
        }
    }
}
