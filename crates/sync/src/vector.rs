use layers::layer::Layer;
use style::reader::StyleReader;

use crate::mirror::MirrorScene;
use crate::synchronizer::Synchronizer;

/// Mirrors a feature layer: visibility, resolved style identity, and one
/// primitive per feature.
#[derive(Debug, Default)]
pub struct VectorSynchronizer;

impl VectorSynchronizer {
    pub fn new() -> Self {
        Self
    }
}

impl Synchronizer for VectorSynchronizer {
    fn kind(&self) -> &'static str {
        "vector"
    }

    fn synchronize(
        &mut self,
        layer: &dyn Layer,
        styles: &mut StyleReader,
        scene: &mut MirrorScene,
    ) {
        let style_key = layer.style_config().map(|config| styles.resolve(config).0);
        let primitive_count = layer.features().len();

        let mirror = scene.upsert(layer.id());
        mirror.visible = layer.visible();
        mirror.style_key = style_key;
        mirror.primitive_count = primitive_count;
        mirror.imagery_url = None;
    }
}
