mod canvas_editor;
mod notifications;
mod batch;
mod pixel_ops;
mod layer_ops;
mod resize;
mod serialize;

pub use self::canvas_editor::*;
pub use self::notifications::*;
pub use self::batch::*;
pub use self::serialize::*;
