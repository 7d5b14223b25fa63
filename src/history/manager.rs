use super::entry::*;

use crate::layer::*;
use crate::pixel::*;

use std::collections::HashMap;

/// Canvases larger than this area (in pixels) store pure pixel batches as sparse patches
/// instead of full snapshots
pub (crate) const PATCH_AREA_THRESHOLD: usize = 64 * 64;

/// Canvases up to this area keep the longer history
pub (crate) const LARGE_CANVAS_AREA: usize = 256 * 256;

/// History depth for canvases at or below `LARGE_CANVAS_AREA`
pub (crate) const MAX_ENTRIES_SMALL_CANVAS: usize = 64;

/// History depth for canvases above `LARGE_CANVAS_AREA`
pub (crate) const MAX_ENTRIES_LARGE_CANVAS: usize = 24;

///
/// The writes recorded so far for a batch that has not committed yet
///
struct OpenBatch {
    /// Per-pixel changes: the first write to a key stores the pre-batch colour, later
    /// writes only update the after colour
    writes: HashMap<PatchKey, PixelChange>,

    /// Set as soon as the batch makes a structural change (layer topology, canvas size,
    /// layer properties): the exact stack state from before the batch began
    structural_before: Option<LayerStack>,
}

///
/// Records committed mutations as a linear undo/redo stack
///
/// Entries are either sparse patches or full snapshots (see `HistoryEntry`). The list is
/// capped: committing past the cap evicts the oldest entry, so the earliest state becomes
/// unreachable. That bound is deliberate and keeps memory finite on long sessions.
///
pub struct HistoryManager {
    /// The committed entries, oldest first
    entries: Vec<HistoryEntry>,

    /// How many entries are currently applied (the next undo steps over `entries[cursor-1]`)
    cursor: usize,

    /// The batch currently being recorded, if one is open
    open_batch: Option<OpenBatch>,
}

impl HistoryManager {
    ///
    /// Creates an empty history
    ///
    pub (crate) fn new() -> HistoryManager {
        HistoryManager {
            entries:    vec![],
            cursor:     0,
            open_batch: None,
        }
    }

    #[inline] pub fn can_undo(&self) -> bool    { self.cursor > 0 }
    #[inline] pub fn can_redo(&self) -> bool    { self.cursor < self.entries.len() }
    #[inline] pub fn depth(&self) -> usize      { self.entries.len() }
    #[inline] pub fn cursor(&self) -> usize     { self.cursor }

    #[inline]
    pub (crate) fn is_batch_open(&self) -> bool {
        self.open_batch.is_some()
    }

    ///
    /// The kind of the committed entry at an index, oldest first
    ///
    pub fn kind_at(&self, index: usize) -> Option<EntryKind> {
        self.entries.get(index).map(|entry| entry.kind())
    }

    ///
    /// Opens a batch. The caller is responsible for rejecting reentrant opens before
    /// calling this.
    ///
    pub (crate) fn begin(&mut self) {
        debug_assert!(self.open_batch.is_none());

        self.open_batch = Some(OpenBatch {
            writes:             HashMap::new(),
            structural_before:  None,
        });
    }

    ///
    /// Records one pixel write into the open batch
    ///
    /// The first write to a key stores `before` as the pre-batch colour; every later write
    /// to the same key only moves the after colour, so a pixel touched many times in one
    /// batch still records exactly one change pair.
    ///
    pub (crate) fn record_write(&mut self, key: PatchKey, before: Rgba, after: Rgba) {
        let batch = match &mut self.open_batch {
            Some(batch) => batch,
            None        => return,
        };

        // Once the batch is structural the final snapshot will capture every pixel anyway
        if batch.structural_before.is_some() {
            return;
        }

        batch.writes.entry(key)
            .or_insert(PixelChange { before: before, after: after })
            .after = after;
    }

    ///
    /// Marks the open batch as structural, capturing the exact pre-batch stack state
    ///
    /// Must be called with the stack as it is *just before* the structural mutation: the
    /// pre-batch state is reconstructed by unapplying the writes recorded so far.
    ///
    pub (crate) fn mark_structural(&mut self, stack: &LayerStack) {
        let batch = match &mut self.open_batch {
            Some(batch) => batch,
            None        => return,
        };

        if batch.structural_before.is_some() {
            return;
        }

        let mut before = stack.clone();
        for (key, change) in batch.writes.iter() {
            before.restore_pixel(key.x, key.y, change.before, key.layer);
        }

        batch.structural_before = Some(before);
    }

    ///
    /// Commits the open batch as a single history entry
    ///
    /// A structural batch always commits a snapshot. A pure pixel batch commits a patch
    /// when the canvas is large enough that snapshots would be wasteful, and a snapshot
    /// otherwise. Batches that made no effective change commit nothing.
    ///
    /// Returns the kind of the committed entry together with whether the batch was
    /// structural, or `None` when there was nothing to commit.
    ///
    pub (crate) fn commit(&mut self, stack: &LayerStack) -> Option<(EntryKind, bool)> {
        let batch       = self.open_batch.take()?;
        let structural  = batch.structural_before.is_some();

        let entry = if let Some(before) = batch.structural_before {
            HistoryEntry::Snapshot {
                before: before,
                after:  stack.clone(),
            }
        } else {
            // Pixels written back to their original colour are no change at all
            let writes = batch.writes.into_iter()
                .filter(|(_, change)| change.before != change.after)
                .collect::<HashMap<_, _>>();

            if writes.is_empty() {
                return None;
            }

            if stack.pixel_area() > PATCH_AREA_THRESHOLD {
                HistoryEntry::Patch { writes: writes }
            } else {
                let mut before = stack.clone();
                for (key, change) in writes.iter() {
                    before.restore_pixel(key.x, key.y, change.before, key.layer);
                }

                HistoryEntry::Snapshot {
                    before: before,
                    after:  stack.clone(),
                }
            }
        };

        let kind = entry.kind();

        self.push_entry(entry, stack);

        Some((kind, structural))
    }

    ///
    /// Abandons the open batch, rewinding every change it made
    ///
    /// Nothing is committed and the stack is left exactly as it was before the batch
    /// began. This is what makes aborting an in-progress gesture safe.
    ///
    pub (crate) fn cancel(&mut self, stack: &mut LayerStack) {
        let batch = match self.open_batch.take() {
            Some(batch) => batch,
            None        => return,
        };

        if let Some(before) = batch.structural_before {
            *stack = before;
        } else {
            for (key, change) in batch.writes.iter() {
                stack.restore_pixel(key.x, key.y, change.before, key.layer);
            }
        }
    }

    ///
    /// Steps back over the most recent applied entry
    ///
    pub (crate) fn undo(&mut self, stack: &mut LayerStack) -> bool {
        if self.open_batch.is_some() || self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        self.entries[self.cursor].apply_before(stack);

        true
    }

    ///
    /// Re-applies the entry that the last undo stepped over
    ///
    pub (crate) fn redo(&mut self, stack: &mut LayerStack) -> bool {
        if self.open_batch.is_some() || self.cursor >= self.entries.len() {
            return false;
        }

        self.entries[self.cursor].apply_after(stack);
        self.cursor += 1;

        true
    }

    ///
    /// Appends a committed entry: any redo entries are discarded and the oldest entry is
    /// evicted once the depth cap for this canvas size is reached
    ///
    fn push_entry(&mut self, entry: HistoryEntry, stack: &LayerStack) {
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor += 1;

        let max_entries = if stack.pixel_area() > LARGE_CANVAS_AREA {
            MAX_ENTRIES_LARGE_CANVAS
        } else {
            MAX_ENTRIES_SMALL_CANVAS
        };

        while self.entries.len() > max_entries {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }
}
