use super::canvas_editor::*;
use super::notifications::*;

use crate::layer::*;

impl CanvasEditor {
    ///
    /// Resizes the canvas, remapping every layer at once so the stack never holds layers
    /// of mixed sizes
    ///
    /// `CropExtend` keeps each pixel at its coordinate; `NearestNeighbour` rescales the
    /// content proportionally. Fails on non-positive dimensions. A resize is always a
    /// single snapshot on the undo stack, whatever its size: a patch cannot represent
    /// buffers whose dimensions changed.
    ///
    pub fn resize(&mut self, new_width: i32, new_height: i32, mode: ResizeMode) -> bool {
        if new_width <= 0 || new_height <= 0 {
            return false;
        }
        if new_width == self.stack.width() && new_height == self.stack.height() {
            return true;
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.resize(new_width, new_height, mode);
            editor.compositor.invalidate();
        });

        true
    }
}
