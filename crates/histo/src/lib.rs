pub mod bin;
pub mod color_bin;
pub mod color_model;
pub mod histogram;
pub mod method;
pub mod sort;

pub use bin::*;
pub use color_bin::*;
pub use color_model::*;
pub use histogram::*;
pub use method::{BinMethod, DateBinMethod, DateBinType, NumericBinMethod, UniqueBinMethod};
pub use sort::SortOrder;
