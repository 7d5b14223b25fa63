use super::canvas_editor::*;
use super::notifications::*;

use crate::history::*;
use crate::pixel::*;

impl CanvasEditor {
    ///
    /// Writes one pixel on the active layer
    ///
    /// Returns false, with no mutation and no notification, when the coordinates are out
    /// of range or the layer is locked. This is routine during interactive use (a brush
    /// dragged past the canvas edge), so it is silent.
    ///
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) -> bool {
        self.set_layer_pixel(x, y, color, self.stack.active_index())
    }

    ///
    /// Writes one pixel on a specific layer
    ///
    pub fn set_layer_pixel(&mut self, x: i32, y: i32, color: Rgba, layer_index: usize) -> bool {
        // Check before touching anything so a rejected write leaves no trace
        if !self.stack.contains(x, y) {
            return false;
        }
        match self.stack.layer(layer_index) {
            Some(layer) if !layer.is_locked()   => { }
            _                                   => { return false; }
        }

        self.with_commit(ChangeEvent::PixelsEdited, |editor| {
            let before = editor.stack.pixel(x, y, layer_index);

            editor.stack.write_pixel(x, y, color, layer_index);
            editor.compositor.invalidate();
            editor.history.record_write(PatchKey { layer: layer_index, x: x, y: y }, before, color);
        });

        true
    }

    ///
    /// Reads one pixel from the active layer, returning transparent for out-of-range
    /// coordinates rather than failing
    ///
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba {
        self.stack.pixel(x, y, self.stack.active_index())
    }

    ///
    /// Reads one pixel from a specific layer
    ///
    #[inline]
    pub fn get_layer_pixel(&self, x: i32, y: i32, layer_index: usize) -> Rgba {
        self.stack.pixel(x, y, layer_index)
    }

    ///
    /// Sets every pixel of a layer to one colour (the active layer if no index is given)
    ///
    /// Fails on a locked or missing layer.
    ///
    pub fn fill_layer(&mut self, color: Rgba, layer_index: Option<usize>) -> bool {
        let layer_index = layer_index.unwrap_or(self.stack.active_index());

        match self.stack.layer(layer_index) {
            Some(layer) if !layer.is_locked()   => { }
            _                                   => { return false; }
        }

        self.with_commit(ChangeEvent::PixelsEdited, |editor| {
            // Record only the pixels the fill actually changes
            for y in 0..editor.stack.height() {
                for x in 0..editor.stack.width() {
                    let before = editor.stack.pixel(x, y, layer_index);

                    if before != color {
                        editor.history.record_write(PatchKey { layer: layer_index, x: x, y: y }, before, color);
                    }
                }
            }

            editor.stack.fill_layer(layer_index, color);
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Resets every pixel of a layer to transparent (the active layer if no index is given)
    ///
    pub fn clear_layer(&mut self, layer_index: Option<usize>) -> bool {
        self.fill_layer(Rgba::TRANSPARENT, layer_index)
    }
}
