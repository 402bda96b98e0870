use style::config::StyleConfig;

use crate::layer::{Layer, LayerId, SYNCHRONIZER_TILE};

/// Imagery layer addressed by a tile url template. Carries no features;
/// only its visibility and imagery source are mirrored into 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    id: LayerId,
    title: String,
    visible: bool,
    url_template: String,
}

impl TileLayer {
    pub fn new(id: LayerId, title: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            visible: true,
            url_template: url_template.into(),
        }
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }
}

impl Layer for TileLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn synchronizer_type(&self) -> Option<&str> {
        Some(SYNCHRONIZER_TILE)
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn style_config(&self) -> Option<&StyleConfig> {
        None
    }

    fn imagery_url(&self) -> Option<&str> {
        Some(&self.url_template)
    }
}
