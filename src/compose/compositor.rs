use crate::layer::*;
use crate::pixel::*;

use itertools::*;

///
/// Flattens the visible layers of a stack into a single raster
///
/// The compositor keeps the most recent full composite and a dirty flag. Any successful
/// pixel write, structural change, or visibility/opacity change must invalidate the cache;
/// `composite_all` only recomputes when it has been invalidated since the last request.
///
pub struct Compositor {
    /// The most recently computed full composite
    cached_composite: Option<PixelBuffer>,

    /// Set when the cached composite no longer matches the stack
    dirty: bool,
}

impl Compositor {
    ///
    /// Creates a compositor with an empty cache
    ///
    pub (crate) fn new() -> Compositor {
        Compositor {
            cached_composite:   None,
            dirty:              true,
        }
    }

    ///
    /// Marks the cached composite as out of date
    ///
    #[inline]
    pub (crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    ///
    /// Flattens a single pixel by folding the visible layers from bottom to top with the
    /// source-over operator, weighted by each layer's opacity
    ///
    /// This always computes directly from the stack and never consults the cache.
    ///
    pub fn composite_pixel(stack: &LayerStack, x: i32, y: i32) -> Rgba {
        let mut blended = BlendAccumulator::new();

        for index in 0..stack.layer_count() {
            let layer = match stack.layer(index) {
                Some(layer) => layer,
                None        => continue,
            };

            if !layer.is_visible() {
                continue;
            }

            blended.blend_over(layer.buffer().pixel(x, y), layer.opacity());
        }

        blended.to_rgba()
    }

    ///
    /// Returns the full flattened raster, recomputing it only if the cache is dirty
    ///
    pub (crate) fn composite_all(&mut self, stack: &LayerStack) -> &PixelBuffer {
        if self.dirty || self.cached_composite.is_none() {
            self.cached_composite   = Some(Self::compute_composite(stack));
            self.dirty              = false;
        }

        self.cached_composite.as_ref().unwrap()
    }

    ///
    /// Computes a full composite from scratch
    ///
    fn compute_composite(stack: &LayerStack) -> PixelBuffer {
        // Fast path: a single visible layer at full opacity composites to a straight copy
        // of its buffer, with no per-pixel arithmetic
        let mut visible_layers = (0..stack.layer_count())
            .filter_map(|index| stack.layer(index))
            .filter(|layer| layer.is_visible());

        if let (Some(only_layer), None) = (visible_layers.next(), visible_layers.next()) {
            if only_layer.opacity() >= 1.0 {
                return only_layer.buffer().clone();
            }
        }

        // General path: fold every pixel through the blend
        let mut composite = PixelBuffer::new(stack.width(), stack.height());

        for (y, x) in (0..stack.height()).cartesian_product(0..stack.width()) {
            composite.set_pixel(x, y, Self::composite_pixel(stack, x, y));
        }

        composite
    }
}
