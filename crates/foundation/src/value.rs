use std::fmt;

/// Dynamic value produced by item accessors.
///
/// Columns in loaded feature data are untyped, so accessors surface whatever
/// a property holds. Coercion rules live here so every bin method agrees on
/// what counts as numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Numeric coercion: numbers pass through (including non-finite ones,
    /// which callers map to their NaN sentinel); text that parses as a
    /// float coerces, matching the loose typing of the source data.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;

    #[test]
    fn numeric_coercion() {
        assert_eq!(FieldValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(FieldValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FieldValue::from("12 items").as_number(), None);
        assert_eq!(FieldValue::Empty.as_number(), None);
    }

    #[test]
    fn emptiness() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn display_is_label_friendly() {
        assert_eq!(FieldValue::Number(9.0).to_string(), "9");
        assert_eq!(FieldValue::Number(9.5).to_string(), "9.5");
        assert_eq!(FieldValue::from("alpha").to_string(), "alpha");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }
}
