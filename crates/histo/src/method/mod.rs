pub mod date;
pub mod numeric;
pub mod unique;

use foundation::value::FieldValue;

use crate::bin::BinKey;

pub use date::{DateBinMethod, DateBinType};
pub use numeric::NumericBinMethod;
pub use unique::UniqueBinMethod;

/// Label used for bins holding empty values.
pub const NO_DATA_LABEL: &str = "No Data";

/// Strategy that deterministically places a value into a bin.
///
/// Methods are stateless and reusable: the same value always produces the
/// same `(key, label)` pair, and keys preserve the natural ordering of the
/// values they were computed from.
pub trait BinMethod {
    fn kind(&self) -> &'static str;

    fn bin_key(&self, value: &FieldValue) -> BinKey;

    fn bin_label(&self, value: &FieldValue) -> String;
}
