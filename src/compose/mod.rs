mod compositor;

pub use self::compositor::*;
