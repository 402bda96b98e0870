use std::collections::BTreeMap;

use foundation::color;
use foundation::value::FieldValue;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

/// One loaded feature: typed properties plus its current display color.
///
/// Geometry is owned by the rendering stack and never crosses into the
/// analytics core, so it does not appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: FeatureId,
    properties: BTreeMap<String, FieldValue>,
    color: String,
}

impl Feature {
    pub fn new(id: FeatureId) -> Self {
        Self {
            id,
            properties: BTreeMap::new(),
            color: color::DEFAULT_COLOR.to_string(),
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn set_property(&mut self, field: impl Into<String>, value: FieldValue) {
        self.properties.insert(field.into(), value);
    }

    /// Missing properties read as `Empty`, matching the loose columnar
    /// model the bin methods expect.
    pub fn property(&self, field: &str) -> FieldValue {
        self.properties.get(field).cloned().unwrap_or(FieldValue::Empty)
    }

    pub fn properties(&self) -> &BTreeMap<String, FieldValue> {
        &self.properties
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, value: &str) {
        self.color = color::normalize(value);
    }
}
