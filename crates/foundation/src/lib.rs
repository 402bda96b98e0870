pub mod color;
pub mod time;
pub mod value;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use time::*;
pub use value::*;
