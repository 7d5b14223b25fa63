mod bounds;
mod engine;

pub use self::bounds::*;
pub use self::engine::*;
