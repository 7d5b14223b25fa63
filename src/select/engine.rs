use super::bounds::*;

use crate::edit::*;
use crate::layer::*;
use crate::pixel::*;

use itertools::*;

///
/// Content lifted off its source layer so it can be moved and transformed freely
///
struct Floating {
    /// Where the content currently sits on the canvas
    bounds: SelectionBounds,

    /// The region currently written onto the lifted layer (trails `bounds` during a
    /// scaling gesture, where pixels only move on release)
    stamped: SelectionBounds,

    /// The lifted pixels at their original size, detached from every layer
    content: PixelBuffer,

    /// The temporary layer holding the stamped content
    layer_id: LayerId,

    /// The gesture currently in progress, if any
    gesture: Gesture,
}

#[derive(Copy, Clone)]
enum Gesture {
    None,
    Dragging { start_bounds: SelectionBounds },
    Scaling { handle: ScaleHandle, start_bounds: SelectionBounds },
}

enum Phase {
    Idle,
    Selecting { anchor: (i32, i32), cursor: (i32, i32) },
    Floating(Floating),
}

///
/// Drives rectangular selections and the geometric operations on them: move, rigid scale,
/// quarter-turn rotation and flips
///
/// The engine is a peer of the editor, not part of it: everything it does to the document
/// goes through the same public mutation primitives the drawing tools use, bracketed in
/// batches so each completed gesture is exactly one undo step.
///
/// Committing a selection *lifts* the bounded region onto a temporary layer directly above
/// the source layer (the region itself is cleared from the source), which is what lets the
/// content move without destroying whatever surrounds it. Clearing the selection merges
/// the temporary layer back down.
///
pub struct SelectionEngine {
    phase: Phase,
}

impl Default for SelectionEngine {
    fn default() -> SelectionEngine {
        SelectionEngine::new()
    }
}

impl SelectionEngine {
    ///
    /// Creates an engine with no active selection
    ///
    pub fn new() -> SelectionEngine {
        SelectionEngine {
            phase: Phase::Idle,
        }
    }

    ///
    /// True once a selection has been committed and its content lifted
    ///
    pub fn has_selection(&self) -> bool {
        matches!(self.phase, Phase::Floating(_))
    }

    ///
    /// True while a selection rectangle is being defined
    ///
    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, Phase::Selecting { .. })
    }

    ///
    /// True while a drag or scale gesture is in progress
    ///
    pub fn is_gesture_active(&self) -> bool {
        match &self.phase {
            Phase::Floating(floating)   => !matches!(floating.gesture, Gesture::None),
            _                           => false,
        }
    }

    ///
    /// The bounds of the in-progress or committed selection
    ///
    pub fn selection_bounds(&self) -> Option<SelectionBounds> {
        match &self.phase {
            Phase::Idle                         => None,
            Phase::Selecting { anchor, cursor } => Some(SelectionBounds::from_corners(*anchor, *cursor)),
            Phase::Floating(floating)           => Some(floating.bounds),
        }
    }

    ///
    /// Starts defining a selection rectangle at a point
    ///
    /// A click inside an already committed selection starts dragging it instead; a click
    /// outside one clears it first, then begins the new rectangle.
    ///
    pub fn begin_selection(&mut self, editor: &mut CanvasEditor, x: i32, y: i32) {
        if let Phase::Floating(floating) = &self.phase {
            if floating.bounds.contains(x, y) {
                self.begin_drag(editor);
                return;
            }

            self.clear_selection(editor);
        }

        let x = x.max(0).min(editor.width() - 1);
        let y = y.max(0).min(editor.height() - 1);

        self.phase = Phase::Selecting { anchor: (x, y), cursor: (x, y) };
    }

    ///
    /// Extends the in-progress selection rectangle to a point
    ///
    pub fn update_selection(&mut self, editor: &CanvasEditor, x: i32, y: i32) -> bool {
        let x = x.max(0).min(editor.width() - 1);
        let y = y.max(0).min(editor.height() - 1);

        match &mut self.phase {
            Phase::Selecting { cursor, .. } => {
                *cursor = (x, y);
                true
            }
            _ => false,
        }
    }

    ///
    /// Commits the selection rectangle, lifting the bounded content onto a temporary
    /// layer so it can be moved and transformed
    ///
    /// The lift (new layer, content copied up, region cleared from the source) is one
    /// batch and therefore one undo step. Fails when the source layer is locked, since
    /// clearing its pixels is exactly what the lock forbids.
    ///
    pub fn commit_selection(&mut self, editor: &mut CanvasEditor) -> bool {
        let (anchor, cursor) = match self.phase {
            Phase::Selecting { anchor, cursor } => (anchor, cursor),
            _                                   => return false,
        };

        let bounds          = SelectionBounds::from_corners(anchor, cursor);
        let source_index    = editor.active_layer_index();

        let source_locked = editor.layer(source_index).map(|layer| layer.is_locked()).unwrap_or(true);
        if source_locked {
            self.phase = Phase::Idle;
            return false;
        }

        // Detach a copy of the region before any mutation
        let content = Self::read_region(editor, source_index, &bounds);

        if editor.start_batch().is_err() {
            return false;
        }

        let lifted_id       = editor.add_layer(Some("Floating selection"), Some(source_index + 1));
        let lifted_index    = source_index + 1;

        for (dy, dx) in (0..bounds.height()).cartesian_product(0..bounds.width()) {
            let x = bounds.left + dx;
            let y = bounds.top + dy;

            editor.set_layer_pixel(x, y, content.pixel(dx, dy), lifted_index);
            editor.set_layer_pixel(x, y, Rgba::TRANSPARENT, source_index);
        }

        editor.end_batch().ok();

        self.phase = Phase::Floating(Floating {
            bounds:     bounds,
            stamped:    bounds,
            content:    content,
            layer_id:   lifted_id,
            gesture:    Gesture::None,
        });

        true
    }

    ///
    /// Starts dragging the committed selection
    ///
    /// The whole drag runs inside one batch: live compositing tracks every step, but
    /// releasing produces a single undo step and aborting restores the start exactly.
    ///
    pub fn begin_drag(&mut self, editor: &mut CanvasEditor) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating) if matches!(floating.gesture, Gesture::None)  => floating,
            _                                                                       => return false,
        };

        if editor.start_batch().is_err() {
            return false;
        }

        floating.gesture = Gesture::Dragging { start_bounds: floating.bounds };
        true
    }

    ///
    /// Moves the selection bounds and the lifted content together
    ///
    /// Content pushed past the canvas edge is clipped from the stamp but preserved in the
    /// detached copy, so dragging back restores it.
    ///
    pub fn drag(&mut self, editor: &mut CanvasEditor, dx: i32, dy: i32) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating)   => floating,
            _                           => return false,
        };

        match floating.gesture {
            Gesture::Dragging { .. }    => { }
            _                           => { return false; }
        }

        floating.bounds = floating.bounds.translated(dx, dy);
        Self::restamp(floating, editor);

        true
    }

    ///
    /// Finishes the drag, committing it as one undo step
    ///
    pub fn release_drag(&mut self, editor: &mut CanvasEditor) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating)   => floating,
            _                           => return false,
        };

        match floating.gesture {
            Gesture::Dragging { .. }    => { }
            _                           => { return false; }
        }

        floating.gesture = Gesture::None;
        editor.end_batch().is_ok()
    }

    ///
    /// Starts scaling the committed selection from one of its corner handles
    ///
    pub fn begin_scale(&mut self, editor: &mut CanvasEditor, handle: ScaleHandle) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating) if matches!(floating.gesture, Gesture::None)  => floating,
            _                                                                       => return false,
        };

        if editor.start_batch().is_err() {
            return false;
        }

        floating.gesture = Gesture::Scaling { handle: handle, start_bounds: floating.bounds };
        true
    }

    ///
    /// Tracks the pointer during a scaling gesture, snapping the bounds rigidly
    ///
    /// Rigid scaling keeps the content pixel-exact: the new size is always a uniform
    /// integer multiple of the lifted content's original size, chosen from the larger of
    /// the two per-axis requests (ties snap to the smaller multiple). Only the bounds
    /// rectangle moves here; pixels are resampled once, on release. Requests that would
    /// shrink the selection below one pixel are ignored.
    ///
    pub fn scale(&mut self, x: i32, y: i32) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating)   => floating,
            _                           => return false,
        };

        let (handle, start_bounds) = match floating.gesture {
            Gesture::Scaling { handle, start_bounds }   => (handle, start_bounds),
            _                                           => return false,
        };

        let (requested_width, requested_height) = handle.requested_size(&start_bounds, x, y);
        if requested_width < 1 || requested_height < 1 {
            return false;
        }

        let content_width   = floating.content.width();
        let content_height  = floating.content.height();

        // The larger of the two requested per-axis multiples wins (compared exactly, by
        // cross-multiplying, before any snapping)
        let multiple = if requested_width as i64 * content_height as i64 >= requested_height as i64 * content_width as i64 {
            Self::snap_multiple(requested_width, content_width)
        } else {
            Self::snap_multiple(requested_height, content_height)
        };

        floating.bounds = handle.anchored(&start_bounds, content_width * multiple, content_height * multiple);
        true
    }

    ///
    /// Finishes the scale: the content is resampled to the snapped bounds with
    /// nearest-neighbour sampling and the gesture commits as one undo step
    ///
    pub fn release_scale(&mut self, editor: &mut CanvasEditor) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating)   => floating,
            _                           => return false,
        };

        match floating.gesture {
            Gesture::Scaling { .. } => { }
            _                       => { return false; }
        }

        Self::restamp(floating, editor);
        floating.gesture = Gesture::None;

        editor.end_batch().is_ok()
    }

    ///
    /// Rotates the selection a quarter turn clockwise
    ///
    /// The rotation is an exact transpose-and-mirror of the lifted grid (lossless, no
    /// resampling); the bounds are recentred on the selection's previous centre with the
    /// rotated dimensions. Applies immediately as one undo step.
    ///
    pub fn rotate_cw(&mut self, editor: &mut CanvasEditor) -> bool {
        self.transform_content(editor, |content| content.rotated_cw())
    }

    ///
    /// Rotates the selection a quarter turn counter-clockwise
    ///
    pub fn rotate_ccw(&mut self, editor: &mut CanvasEditor) -> bool {
        self.transform_content(editor, |content| content.rotated_ccw())
    }

    ///
    /// Mirrors the selection left-to-right
    ///
    pub fn flip_horizontal(&mut self, editor: &mut CanvasEditor) -> bool {
        self.transform_content(editor, |content| content.flipped_horizontal())
    }

    ///
    /// Mirrors the selection top-to-bottom
    ///
    pub fn flip_vertical(&mut self, editor: &mut CanvasEditor) -> bool {
        self.transform_content(editor, |content| content.flipped_vertical())
    }

    ///
    /// Ends the selection, returning the lifted content to the stack
    ///
    /// Non-empty content merges down onto the layer it was lifted from; an empty lifted
    /// layer is simply discarded. Either way this is one batch. An unfinished gesture is
    /// aborted first so no partial entry can leak out.
    ///
    pub fn clear_selection(&mut self, editor: &mut CanvasEditor) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => false,

            Phase::Selecting { .. } => true,

            Phase::Floating(floating) => {
                if !matches!(floating.gesture, Gesture::None) {
                    editor.cancel_batch().ok();
                }

                if let Some(lifted_index) = editor.layer_index_of(floating.layer_id) {
                    let blank = editor.layer(lifted_index).map(|layer| layer.buffer().is_blank()).unwrap_or(true);

                    if blank {
                        editor.delete_layer(lifted_index);
                    } else {
                        // A locked merge target refuses the merge; the lifted layer then
                        // stays behind as an ordinary layer rather than lose content
                        editor.merge_down(lifted_index);
                    }
                }

                true
            }
        }
    }

    ///
    /// Abandons an in-progress drag or scale, restoring the pre-gesture state exactly
    ///
    /// The open batch is cancelled rather than committed: the lifted layer's pixels
    /// rewind, the bounds snap back, and no history entry is left behind.
    ///
    pub fn abort_gesture(&mut self, editor: &mut CanvasEditor) -> bool {
        match &mut self.phase {
            Phase::Idle => false,

            Phase::Selecting { .. } => {
                self.phase = Phase::Idle;
                true
            }

            Phase::Floating(floating) => {
                let start_bounds = match floating.gesture {
                    Gesture::Dragging { start_bounds }      => start_bounds,
                    Gesture::Scaling { start_bounds, .. }   => start_bounds,
                    Gesture::None                           => return false,
                };

                editor.cancel_batch().ok();

                floating.bounds     = start_bounds;
                floating.stamped    = start_bounds;
                floating.gesture    = Gesture::None;

                true
            }
        }
    }

    ///
    /// Applies a grid transform to the lifted content as a single batched edit
    ///
    fn transform_content(&mut self, editor: &mut CanvasEditor, transform: impl FnOnce(&PixelBuffer) -> PixelBuffer) -> bool {
        let floating = match &mut self.phase {
            Phase::Floating(floating) if matches!(floating.gesture, Gesture::None)  => floating,
            _                                                                       => return false,
        };

        if editor.start_batch().is_err() {
            return false;
        }

        let new_content = transform(&floating.content);

        // Any rigid scale applied so far carries over to the transformed content
        let old_width   = floating.bounds.width();
        let old_height  = floating.bounds.height();
        let multiple    = (old_width / floating.content.width()).max(1);
        let new_width   = new_content.width() * multiple;
        let new_height  = new_content.height() * multiple;

        floating.content    = new_content;
        floating.bounds     = SelectionBounds {
            left:   floating.bounds.left + (old_width - new_width) / 2,
            top:    floating.bounds.top + (old_height - new_height) / 2,
            right:  floating.bounds.left + (old_width - new_width) / 2 + new_width - 1,
            bottom: floating.bounds.top + (old_height - new_height) / 2 + new_height - 1,
        };

        Self::restamp(floating, editor);
        editor.end_batch().ok();

        true
    }

    ///
    /// Rewrites the lifted layer: the previously stamped region is erased and the content
    /// is stamped at the current bounds, resampled if the bounds have been scaled
    ///
    /// Every write goes through the editor's pixel primitives, so an open batch records
    /// the whole restamp and off-canvas writes clip silently.
    ///
    fn restamp(floating: &mut Floating, editor: &mut CanvasEditor) {
        let lifted_index = match editor.layer_index_of(floating.layer_id) {
            Some(index) => index,
            None        => return,
        };

        let erase = floating.stamped;
        for (y, x) in (erase.top..=erase.bottom).cartesian_product(erase.left..=erase.right) {
            editor.set_layer_pixel(x, y, Rgba::TRANSPARENT, lifted_index);
        }

        let bounds      = floating.bounds;
        let resampled;
        let stamp       = if bounds.width() == floating.content.width() && bounds.height() == floating.content.height() {
            &floating.content
        } else {
            resampled = floating.content.rescale_nearest(bounds.width(), bounds.height());
            &resampled
        };

        for (dy, dx) in (0..bounds.height()).cartesian_product(0..bounds.width()) {
            editor.set_layer_pixel(bounds.left + dx, bounds.top + dy, stamp.pixel(dx, dy), lifted_index);
        }

        floating.stamped = bounds;
    }

    ///
    /// Copies a rectangular region of a layer into a detached buffer
    ///
    fn read_region(editor: &CanvasEditor, layer_index: usize, bounds: &SelectionBounds) -> PixelBuffer {
        let mut content = PixelBuffer::new(bounds.width(), bounds.height());

        for (dy, dx) in (0..bounds.height()).cartesian_product(0..bounds.width()) {
            content.set_pixel(dx, dy, editor.get_layer_pixel(bounds.left + dx, bounds.top + dy, layer_index));
        }

        content
    }

    ///
    /// The integer multiple of `original` nearest to `requested`, with exact halves
    /// snapping to the smaller multiple, and never less than 1
    ///
    fn snap_multiple(requested: i32, original: i32) -> i32 {
        ((2 * requested + original - 1) / (2 * original)).max(1)
    }
}
