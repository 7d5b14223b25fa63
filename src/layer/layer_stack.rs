use super::layer::*;

use crate::pixel::*;

use smallvec::*;

///
/// How the canvas content is mapped when a stack is resized
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResizeMode {
    /// Every pixel keeps its coordinate: new area is transparent, content outside the new
    /// bounds is discarded
    CropExtend,

    /// Every destination pixel samples the proportional source pixel (nearest-neighbour)
    NearestNeighbour,
}

///
/// An ordered collection of layers (bottom to top) sharing one canvas size, with a pointer
/// to the layer that edits currently target
///
/// The stack maintains three invariants: at least one layer always exists, the active index
/// is always in range, and every layer's buffer matches the stack dimensions. It is a pure
/// data structure — history recording, composite caching and change notification are the
/// concern of the editor that owns it.
///
#[derive(Clone, PartialEq, Debug)]
pub struct LayerStack {
    /// The width of the canvas in pixels
    width: i32,

    /// The height of the canvas in pixels
    height: i32,

    /// The layers, in bottom-to-top order
    layers: SmallVec<[Layer; 4]>,

    /// The index of the layer that edits target
    active_index: usize,
}

impl LayerStack {
    ///
    /// Creates a stack containing a single transparent background layer
    ///
    pub (crate) fn new(width: i32, height: i32) -> LayerStack {
        assert!(width > 0 && height > 0, "layer stacks must have positive dimensions");

        let mut layers = SmallVec::new();
        layers.push(Layer::new("Background".to_string(), width, height));

        LayerStack {
            width:          width,
            height:         height,
            layers:         layers,
            active_index:   0,
        }
    }

    ///
    /// Builds a stack directly from a prepared set of layers (used by the serialization boundary)
    ///
    pub (crate) fn from_layers(width: i32, height: i32, layers: SmallVec<[Layer; 4]>, active_index: usize) -> LayerStack {
        assert!(width > 0 && height > 0, "layer stacks must have positive dimensions");
        assert!(!layers.is_empty(), "layer stacks must contain at least one layer");

        let active_index = active_index.min(layers.len() - 1);

        LayerStack {
            width:          width,
            height:         height,
            layers:         layers,
            active_index:   active_index,
        }
    }

    #[inline] pub fn width(&self) -> i32            { self.width }
    #[inline] pub fn height(&self) -> i32           { self.height }
    #[inline] pub fn layer_count(&self) -> usize    { self.layers.len() }
    #[inline] pub fn active_index(&self) -> usize   { self.active_index }

    ///
    /// The number of pixels in one layer of the canvas
    ///
    #[inline]
    pub fn pixel_area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    ///
    /// Retrieves the layer at an index (0 is the bottom of the stack)
    ///
    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[inline]
    pub (crate) fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    ///
    /// Finds the current index of the layer with a particular id
    ///
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    ///
    /// True if the coordinates lie within the canvas
    ///
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    ///
    /// Moves the active pointer to another layer
    ///
    pub (crate) fn set_active(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            return false;
        }

        self.active_index = index;
        true
    }

    ///
    /// Inserts a new transparent layer and returns its index
    ///
    /// With no position the layer goes on top. When the insertion point is at or below the
    /// active layer, the active index shifts up so it keeps referring to the same layer.
    ///
    pub (crate) fn add_layer(&mut self, name: Option<&str>, position: Option<usize>) -> usize {
        let name        = name.map(|name| name.to_string()).unwrap_or_else(|| format!("Layer {}", self.layers.len() + 1));
        let position    = position.unwrap_or(self.layers.len()).min(self.layers.len());

        self.layers.insert(position, Layer::new(name, self.width, self.height));

        if position <= self.active_index {
            self.active_index += 1;
        }

        position
    }

    ///
    /// Removes a layer, refusing to remove the last one
    ///
    pub (crate) fn delete_layer(&mut self, index: usize) -> bool {
        if self.layers.len() <= 1 || index >= self.layers.len() {
            return false;
        }

        self.layers.remove(index);

        if index < self.active_index {
            // The active layer moved down one slot: follow it
            self.active_index -= 1;
        } else if self.active_index >= self.layers.len() {
            self.active_index = self.layers.len() - 1;
        }

        true
    }

    ///
    /// Deep-copies a layer and inserts the copy immediately above the original, returning
    /// the copy's index
    ///
    pub (crate) fn duplicate_layer(&mut self, index: usize) -> Option<usize> {
        if index >= self.layers.len() {
            return None;
        }

        let copy = self.layers[index].duplicate();
        self.layers.insert(index + 1, copy);

        if index + 1 <= self.active_index {
            self.active_index += 1;
        }

        Some(index + 1)
    }

    ///
    /// Reorders a layer from one index to another
    ///
    /// The active index is remapped so that it continues to refer to the same layer it
    /// referred to before the move.
    ///
    pub (crate) fn move_layer(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.layers.len() || to >= self.layers.len() {
            return false;
        }

        let active_id   = self.layers[self.active_index].id;
        let layer       = self.layers.remove(from);
        self.layers.insert(to, layer);

        // Follow the previously active layer to wherever it ended up
        self.active_index = self.index_of(active_id).unwrap_or(0);

        true
    }

    ///
    /// Reads a pixel from a layer, returning transparent for out-of-range coordinates or a
    /// bad layer index
    ///
    #[inline]
    pub fn pixel(&self, x: i32, y: i32, layer_index: usize) -> Rgba {
        match self.layers.get(layer_index) {
            Some(layer) => layer.buffer.pixel(x, y),
            None        => Rgba::TRANSPARENT,
        }
    }

    ///
    /// Writes a pixel to a layer, failing without mutation if the coordinates are out of
    /// range or the layer is locked or missing
    ///
    #[inline]
    pub (crate) fn write_pixel(&mut self, x: i32, y: i32, color: Rgba, layer_index: usize) -> bool {
        if !self.contains(x, y) {
            return false;
        }

        match self.layers.get_mut(layer_index) {
            Some(layer) if !layer.locked    => layer.buffer.set_pixel(x, y, color),
            _                               => false,
        }
    }

    ///
    /// Writes a pixel regardless of the layer's lock state
    ///
    /// History restores use this: a lock applied after a stroke must not stop that stroke
    /// from being undone.
    ///
    #[inline]
    pub (crate) fn restore_pixel(&mut self, x: i32, y: i32, color: Rgba, layer_index: usize) {
        if let Some(layer) = self.layers.get_mut(layer_index) {
            layer.buffer.set_pixel(x, y, color);
        }
    }

    ///
    /// Sets every pixel of a layer to one colour, failing if the layer is locked or missing
    ///
    pub (crate) fn fill_layer(&mut self, index: usize, color: Rgba) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) if !layer.locked => {
                layer.buffer.fill(color);
                true
            }
            _ => false,
        }
    }

    ///
    /// Resizes every layer at once so the stack dimensions stay consistent
    ///
    pub (crate) fn resize(&mut self, new_width: i32, new_height: i32, mode: ResizeMode) {
        assert!(new_width > 0 && new_height > 0, "layer stacks must have positive dimensions");

        for layer in self.layers.iter_mut() {
            layer.buffer = match mode {
                ResizeMode::CropExtend          => layer.buffer.crop_extend(new_width, new_height),
                ResizeMode::NearestNeighbour    => layer.buffer.rescale_nearest(new_width, new_height),
            };
        }

        self.width  = new_width;
        self.height = new_height;
    }

    ///
    /// Composites the layer at an index onto the layer beneath it, weighted by the upper
    /// layer's opacity, then removes the upper layer
    ///
    /// Fails if the index is the bottom layer or the layer beneath is locked. The lower
    /// layer keeps its own properties (name, opacity, visibility).
    ///
    pub (crate) fn merge_down(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.layers.len() {
            return false;
        }
        if self.layers[index - 1].locked {
            return false;
        }

        let upper_opacity = self.layers[index].opacity;

        for y in 0..self.height {
            for x in 0..self.width {
                let upper = self.layers[index].buffer.pixel(x, y);

                if upper.is_transparent() {
                    continue;
                }

                let lower = self.layers[index - 1].buffer.pixel(x, y);

                let mut blended = BlendAccumulator::new();
                blended.blend_over(lower, 1.0);
                blended.blend_over(upper, upper_opacity);

                self.layers[index - 1].buffer.set_pixel(x, y, blended.to_rgba());
            }
        }

        self.layers.remove(index);

        if index < self.active_index {
            self.active_index -= 1;
        } else if self.active_index >= self.layers.len() {
            self.active_index = self.layers.len() - 1;
        }

        true
    }
}
