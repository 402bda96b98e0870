use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative style configs, typed at the JSON boundary.
///
/// Parsing is tolerant on purpose: a malformed sub-config degrades to
/// `None` (and later to a style with that part absent) instead of failing
/// the whole layer. Only syntactically invalid JSON is an error.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    #[serde(rename = "zIndex", skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageConfig {
    Circle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<FillConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<StrokeConfig>,
    },
    Icon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "lineDash", skip_serializing_if = "Option::is_none")]
    pub line_dash: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    InvalidJson(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::InvalidJson(msg) => write!(f, "invalid style json: {msg}"),
        }
    }
}

impl std::error::Error for StyleError {}

impl StyleConfig {
    /// Parses a config from JSON, salvaging whatever sub-configs are
    /// well-formed. A sub-config of the wrong shape becomes `None` rather
    /// than poisoning the rest.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| StyleError::InvalidJson(e.to_string()))?;

        let field = |name: &str| value.get(name).cloned();

        Ok(Self {
            geometry: field("geometry").and_then(|v| v.as_str().map(str::to_string)),
            z_index: parse_opt(field("zIndex")),
            image: parse_opt(field("image")),
            fill: parse_opt(field("fill")),
            stroke: parse_opt(field("stroke")),
        })
    }
}

fn parse_opt<T: serde::de::DeserializeOwned>(value: Option<Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{FillConfig, ImageConfig, StyleConfig};

    #[test]
    fn parses_a_full_config() {
        let config = StyleConfig::from_json(
            r##"{
                "geometry": "center",
                "zIndex": 3,
                "image": {"type": "circle", "radius": 4, "fill": {"color": "#ff0000"}},
                "stroke": {"color": "#00ff00", "width": 2, "lineDash": [4, 4]}
            }"##,
        )
        .unwrap();

        assert_eq!(config.geometry.as_deref(), Some("center"));
        assert_eq!(config.z_index, Some(3));
        assert!(matches!(
            config.image,
            Some(ImageConfig::Circle { radius: Some(r), .. }) if r == 4.0
        ));
        assert_eq!(
            config.stroke.as_ref().and_then(|s| s.line_dash.clone()),
            Some(vec![4.0, 4.0])
        );
        assert_eq!(config.fill, None);
    }

    #[test]
    fn malformed_sub_configs_degrade_to_none() {
        let config = StyleConfig::from_json(
            r##"{"image": "not an object", "fill": {"color": "#0000ff"}, "zIndex": "top"}"##,
        )
        .unwrap();
        assert_eq!(config.image, None);
        assert_eq!(config.z_index, None);
        assert_eq!(
            config.fill,
            Some(FillConfig {
                color: Some("#0000ff".to_string())
            })
        );
    }

    #[test]
    fn invalid_json_is_the_only_hard_error() {
        assert!(StyleConfig::from_json("{not json").is_err());
        assert_eq!(StyleConfig::from_json("{}").unwrap(), StyleConfig::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config = StyleConfig::from_json(r##"{"opacity": 0.5, "zIndex": 1}"##).unwrap();
        assert_eq!(config.z_index, Some(1));
    }

    #[test]
    fn serializes_without_absent_fields() {
        let json = serde_json::to_string(&StyleConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
