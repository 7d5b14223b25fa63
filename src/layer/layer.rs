use crate::pixel::*;

use uuid::Uuid;

///
/// An opaque token that identifies a layer for as long as it exists in a document
///
/// Ids stay stable while layers are reordered, which is what callers should hold on to
/// when they need to track a layer across structural changes (indices shift, ids do not).
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    #[inline]
    pub (crate) fn new() -> LayerId {
        LayerId(Uuid::new_v4())
    }
}

///
/// The ways a layer can be blended with the layers below it
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard source-over alpha blending
    Normal,
}

impl Default for BlendMode {
    fn default() -> BlendMode {
        BlendMode::Normal
    }
}

///
/// A single raster layer: an independently visible, lockable pixel buffer that shares the
/// canvas dimensions of the stack that owns it
///
#[derive(Clone, PartialEq, Debug)]
pub struct Layer {
    /// The identity of this layer
    pub (crate) id: LayerId,

    /// The display name of this layer
    pub (crate) name: String,

    /// Whether or not this layer contributes to the composite
    pub (crate) visible: bool,

    /// The transparency of this layer, 0..1
    pub (crate) opacity: f32,

    /// A locked layer rejects all pixel writes
    pub (crate) locked: bool,

    /// How this layer blends with the layers beneath it
    pub (crate) blend_mode: BlendMode,

    /// The pixels stored for this layer
    pub (crate) buffer: PixelBuffer,
}

impl Layer {
    ///
    /// Creates a new fully transparent layer
    ///
    pub (crate) fn new(name: String, width: i32, height: i32) -> Layer {
        Layer {
            id:         LayerId::new(),
            name:       name,
            visible:    true,
            opacity:    1.0,
            locked:     false,
            blend_mode: BlendMode::Normal,
            buffer:     PixelBuffer::new(width, height),
        }
    }

    ///
    /// Creates an independent copy of this layer with a fresh identity
    ///
    pub (crate) fn duplicate(&self) -> Layer {
        Layer {
            id:         LayerId::new(),
            name:       format!("{} copy", self.name),
            visible:    self.visible,
            opacity:    self.opacity,
            locked:     self.locked,
            blend_mode: self.blend_mode,
            buffer:     self.buffer.clone(),
        }
    }

    #[inline] pub fn id(&self) -> LayerId             { self.id }
    #[inline] pub fn name(&self) -> &str              { &self.name }
    #[inline] pub fn is_visible(&self) -> bool        { self.visible }
    #[inline] pub fn opacity(&self) -> f32            { self.opacity }
    #[inline] pub fn is_locked(&self) -> bool         { self.locked }
    #[inline] pub fn blend_mode(&self) -> BlendMode   { self.blend_mode }

    ///
    /// The pixels stored for this layer
    ///
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}
