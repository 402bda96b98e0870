use foundation::value::FieldValue;

use crate::bin::{BinKey, MAGIC_EMPTY, MAGIC_NAN};
use crate::method::{BinMethod, NO_DATA_LABEL};

pub const NAN_LABEL: &str = "NaN";

/// Fixed-width range binning: the key is the lower edge of the containing
/// range, so keys order the same way the underlying values do.
///
/// Empty values key to `MAGIC_EMPTY` and values that cannot be coerced to
/// a finite number key to `MAGIC_NAN`, which keeps the whole key space
/// numerically comparable.
#[derive(Debug, Copy, Clone)]
pub struct NumericBinMethod {
    width: f64,
    offset: f64,
}

impl Default for NumericBinMethod {
    fn default() -> Self {
        Self {
            width: 10.0,
            offset: 0.0,
        }
    }
}

impl NumericBinMethod {
    pub fn new(width: f64, offset: f64) -> Self {
        Self {
            width: if width.is_finite() && width > 0.0 {
                width
            } else {
                Self::default().width
            },
            offset: if offset.is_finite() { offset } else { 0.0 },
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    fn key_value(&self, value: &FieldValue) -> f64 {
        if value.is_empty() {
            return MAGIC_EMPTY;
        }
        match value.as_number() {
            Some(n) if n.is_finite() => ((n - self.offset) / self.width).floor() * self.width + self.offset,
            _ => MAGIC_NAN,
        }
    }
}

impl BinMethod for NumericBinMethod {
    fn kind(&self) -> &'static str {
        "numeric"
    }

    fn bin_key(&self, value: &FieldValue) -> BinKey {
        BinKey::Number(self.key_value(value))
    }

    fn bin_label(&self, value: &FieldValue) -> String {
        let key = self.key_value(value);
        if key == MAGIC_EMPTY {
            NO_DATA_LABEL.to_string()
        } else if key == MAGIC_NAN {
            NAN_LABEL.to_string()
        } else {
            format!("{} to {}", key, key + self.width)
        }
    }
}
