mod layer;
mod layer_stack;

pub use self::layer::*;
pub use self::layer_stack::*;
