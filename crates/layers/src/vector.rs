use style::config::StyleConfig;

use crate::feature::{Feature, FeatureId};
use crate::layer::{Layer, LayerId, SYNCHRONIZER_VECTOR};

/// Feature layer: the unit the bin engine and vector synchronizer work on.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLayer {
    id: LayerId,
    title: String,
    visible: bool,
    style: Option<StyleConfig>,
    features: Vec<Feature>,
}

impl VectorLayer {
    pub fn new(id: LayerId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            visible: true,
            style: None,
            features: Vec::new(),
        }
    }

    pub fn with_style(id: LayerId, title: impl Into<String>, style: StyleConfig) -> Self {
        let mut layer = Self::new(id, title);
        layer.style = Some(style);
        layer
    }

    pub fn set_style_config(&mut self, style: Option<StyleConfig>) {
        self.style = style;
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    pub fn feature_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id() == id)
    }

    pub fn remove_feature(&mut self, id: FeatureId) -> Option<Feature> {
        let pos = self.features.iter().position(|f| f.id() == id)?;
        Some(self.features.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Layer for VectorLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn synchronizer_type(&self) -> Option<&str> {
        Some(SYNCHRONIZER_VECTOR)
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn style_config(&self) -> Option<&StyleConfig> {
        self.style.as_ref()
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn features_mut(&mut self) -> &mut [Feature] {
        &mut self.features
    }
}

#[cfg(test)]
mod tests {
    use foundation::value::FieldValue;

    use super::VectorLayer;
    use crate::feature::{Feature, FeatureId};
    use crate::layer::{Layer, LayerId, SYNCHRONIZER_VECTOR};

    #[test]
    fn declares_the_vector_synchronizer() {
        let layer = VectorLayer::new(LayerId(1), "tracks");
        assert_eq!(layer.synchronizer_type(), Some(SYNCHRONIZER_VECTOR));
        assert!(layer.visible());
    }

    #[test]
    fn features_are_found_and_removed_by_id() {
        let mut layer = VectorLayer::new(LayerId(1), "tracks");
        let mut feature = Feature::new(FeatureId(9));
        feature.set_property("speed", FieldValue::Number(4.0));
        layer.add_feature(feature);

        assert_eq!(
            layer.feature(FeatureId(9)).map(|f| f.property("speed")),
            Some(FieldValue::Number(4.0))
        );
        assert!(layer.remove_feature(FeatureId(9)).is_some());
        assert!(layer.remove_feature(FeatureId(9)).is_none());
        assert!(layer.is_empty());
    }
}
