use layers::layer::Layer;
use style::reader::StyleReader;

use crate::mirror::MirrorScene;
use crate::synchronizer::Synchronizer;

/// Mirrors an imagery layer: visibility and tile source only.
#[derive(Debug, Default)]
pub struct TileSynchronizer;

impl TileSynchronizer {
    pub fn new() -> Self {
        Self
    }
}

impl Synchronizer for TileSynchronizer {
    fn kind(&self) -> &'static str {
        "tile"
    }

    fn synchronize(
        &mut self,
        layer: &dyn Layer,
        _styles: &mut StyleReader,
        scene: &mut MirrorScene,
    ) {
        let imagery_url = layer.imagery_url().map(str::to_string);

        let mirror = scene.upsert(layer.id());
        mirror.visible = layer.visible();
        mirror.style_key = None;
        mirror.primitive_count = 0;
        mirror.imagery_url = imagery_url;
    }
}
