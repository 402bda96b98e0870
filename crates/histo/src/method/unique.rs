use foundation::value::FieldValue;

use crate::bin::BinKey;
use crate::method::{BinMethod, NO_DATA_LABEL};

/// One bin per distinct value string.
#[derive(Debug, Default, Copy, Clone)]
pub struct UniqueBinMethod;

impl UniqueBinMethod {
    pub fn new() -> Self {
        Self
    }

    fn value_string(value: &FieldValue) -> String {
        if value.is_empty() {
            NO_DATA_LABEL.to_string()
        } else {
            value.to_string()
        }
    }
}

impl BinMethod for UniqueBinMethod {
    fn kind(&self) -> &'static str {
        "unique"
    }

    fn bin_key(&self, value: &FieldValue) -> BinKey {
        BinKey::Text(Self::value_string(value))
    }

    fn bin_label(&self, value: &FieldValue) -> String {
        Self::value_string(value)
    }
}

#[cfg(test)]
mod tests {
    use foundation::value::FieldValue;

    use super::UniqueBinMethod;
    use crate::bin::BinKey;
    use crate::method::BinMethod;

    #[test]
    fn distinct_values_get_distinct_keys() {
        let method = UniqueBinMethod::new();
        assert_eq!(
            method.bin_key(&FieldValue::from("alpha")),
            BinKey::from("alpha")
        );
        assert_eq!(method.bin_key(&FieldValue::Number(4.0)), BinKey::from("4"));
    }

    #[test]
    fn empty_values_share_the_no_data_bin() {
        let method = UniqueBinMethod::new();
        assert_eq!(method.bin_key(&FieldValue::Empty), BinKey::from("No Data"));
        assert_eq!(method.bin_key(&FieldValue::from("")), BinKey::from("No Data"));
        assert_eq!(method.bin_label(&FieldValue::Empty), "No Data");
    }
}
