use super::canvas_editor::*;

use crate::layer::*;
use crate::pixel::*;

use smallvec::*;

use std::error::Error;
use std::fmt;

///
/// A plain structural description of a document, for the persistence collaborator
///
/// This is the whole serialization boundary: the editor produces and consumes these
/// descriptions but performs no I/O itself. Layer ids are session tokens and are not part
/// of the description; a reconstructed document allocates fresh ones.
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SerializedCanvas {
    pub width:          i32,
    pub height:         i32,
    pub active_index:   usize,
    pub layers:         Vec<SerializedLayer>,
}

///
/// One layer of a serialized document
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SerializedLayer {
    pub name:       String,
    pub visible:    bool,
    pub opacity:    f32,
    pub locked:     bool,
    pub blend_mode: BlendMode,

    /// Packed row-major RGBA bytes, width*height*4 of them
    pub pixels:     Vec<u8>,
}

///
/// Errors raised when a serialized description cannot be turned back into a document
///
/// These indicate corrupted or malformed data that the persistence collaborator should
/// have repaired before handing it over; the checks here are the last line that keeps the
/// buffer-size invariants structural.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasDataError {
    /// The canvas dimensions were zero or negative
    InvalidDimensions(i32, i32),

    /// The description contained no layers at all
    NoLayers,

    /// A layer's pixel block was not width*height*4 bytes long
    MismatchedPixelBuffer { layer: usize, expected: usize, actual: usize },
}

impl fmt::Display for CanvasDataError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CanvasDataError::InvalidDimensions(width, height)                   => write!(fmt, "invalid canvas dimensions {}x{}", width, height),
            CanvasDataError::NoLayers                                           => write!(fmt, "a document needs at least one layer"),
            CanvasDataError::MismatchedPixelBuffer { layer, expected, actual }  => write!(fmt, "layer {} has {} pixel bytes where {} were expected", layer, actual, expected),
        }
    }
}

impl Error for CanvasDataError { }

impl CanvasEditor {
    ///
    /// Produces a plain description of the current document state
    ///
    pub fn to_serializable(&self) -> SerializedCanvas {
        let layers = (0..self.stack.layer_count())
            .filter_map(|index| self.stack.layer(index))
            .map(|layer| SerializedLayer {
                name:       layer.name().to_string(),
                visible:    layer.is_visible(),
                opacity:    layer.opacity(),
                locked:     layer.is_locked(),
                blend_mode: layer.blend_mode(),
                pixels:     layer.buffer().as_bytes().to_vec(),
            })
            .collect();

        SerializedCanvas {
            width:          self.stack.width(),
            height:         self.stack.height(),
            active_index:   self.stack.active_index(),
            layers:         layers,
        }
    }

    ///
    /// Reconstructs an editor from a plain description
    ///
    /// The new editor starts with empty history and no notifier. An out-of-range active
    /// index is clamped; bad dimensions or mismatched pixel blocks are rejected.
    ///
    pub fn from_serializable(data: SerializedCanvas) -> Result<CanvasEditor, CanvasDataError> {
        if data.width <= 0 || data.height <= 0 {
            return Err(CanvasDataError::InvalidDimensions(data.width, data.height));
        }
        if data.layers.is_empty() {
            return Err(CanvasDataError::NoLayers);
        }

        let expected_len    = (data.width as usize) * (data.height as usize) * 4;
        let mut layers      = SmallVec::new();

        for (index, layer_data) in data.layers.into_iter().enumerate() {
            if layer_data.pixels.len() != expected_len {
                return Err(CanvasDataError::MismatchedPixelBuffer {
                    layer:      index,
                    expected:   expected_len,
                    actual:     layer_data.pixels.len(),
                });
            }

            layers.push(Layer {
                id:         LayerId::new(),
                name:       layer_data.name,
                visible:    layer_data.visible,
                opacity:    layer_data.opacity.max(0.0).min(1.0),
                locked:     layer_data.locked,
                blend_mode: layer_data.blend_mode,
                buffer:     PixelBuffer::from_pixels(data.width, data.height, layer_data.pixels),
            });
        }

        let mut editor  = CanvasEditor::new(data.width, data.height);
        editor.stack    = LayerStack::from_layers(data.width, data.height, layers, data.active_index);

        Ok(editor)
    }
}
