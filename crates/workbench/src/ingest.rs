use foundation::value::FieldValue;
use layers::feature::{Feature, FeatureId};
use serde_json::Value;

/// Tolerant ingest of a GeoJSON-shaped feature collection.
///
/// Only properties (and an optional display color) cross into the
/// analytics core; geometry belongs to the rendering stack and is
/// ignored here. Entries that are not objects are skipped rather than
/// failing the whole load.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    InvalidJson(String),
    NotACollection,
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::InvalidJson(msg) => write!(f, "invalid feature json: {msg}"),
            IngestError::NotACollection => {
                write!(f, "expected a feature collection or feature array")
            }
        }
    }
}

impl std::error::Error for IngestError {}

pub fn features_from_json(json: &str) -> Result<Vec<Feature>, IngestError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| IngestError::InvalidJson(e.to_string()))?;

    let entries = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or(IngestError::NotACollection)?,
        _ => return Err(IngestError::NotACollection),
    };

    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(obj) = entry else {
            continue;
        };

        let id = obj
            .get("id")
            .and_then(Value::as_u64)
            .unwrap_or(index as u64);
        let mut feature = Feature::new(FeatureId(id));

        if let Some(Value::Object(props)) = obj.get("properties") {
            for (name, raw) in props {
                feature.set_property(name.clone(), field_value(raw));
            }
        }

        if let Some(color) = obj.get("color").and_then(Value::as_str) {
            feature.set_color(color);
        }

        out.push(feature);
    }
    Ok(out)
}

fn field_value(raw: &Value) -> FieldValue {
    match raw {
        Value::Null => FieldValue::Empty,
        Value::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Empty),
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Bool(b) => FieldValue::Text(b.to_string()),
        // Nested structures keep their JSON form; unique binning can still
        // group on it.
        other => FieldValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use foundation::value::FieldValue;
    use layers::feature::FeatureId;
    use pretty_assertions::assert_eq;

    use super::{IngestError, features_from_json};

    #[test]
    fn parses_a_feature_collection() {
        let features = features_from_json(
            r##"{
                "type": "FeatureCollection",
                "features": [
                    {"id": 7, "color": "#ff0000", "properties": {"speed": 12.5, "name": "a"}},
                    {"properties": {"speed": null}}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id(), FeatureId(7));
        assert_eq!(features[0].property("speed"), FieldValue::Number(12.5));
        assert_eq!(features[0].color(), "#ff0000");
        assert_eq!(features[1].id(), FeatureId(1));
        assert_eq!(features[1].property("speed"), FieldValue::Empty);
    }

    #[test]
    fn accepts_a_bare_array_and_skips_junk_entries() {
        let features = features_from_json(
            r##"[{"properties": {"kind": "truck"}}, 42, {"properties": {"kind": "car"}}]"##,
        )
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].property("kind"), FieldValue::from("car"));
    }

    #[test]
    fn rejects_non_collections() {
        assert_eq!(
            features_from_json(r##"{"type": "Feature"}"##),
            Err(IngestError::NotACollection)
        );
        assert!(matches!(
            features_from_json("nope"),
            Err(IngestError::InvalidJson(_))
        ));
    }
}
