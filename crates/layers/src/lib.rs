pub mod feature;
pub mod layer;
pub mod tile;
pub mod vector;

pub use feature::*;
pub use layer::*;
pub use tile::*;
pub use vector::*;
