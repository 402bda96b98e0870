use layers::layer::Layer;
use style::reader::StyleReader;

use crate::mirror::MirrorScene;

/// Mirrors one 2D layer's state into the 3D scene model.
///
/// Synchronizers are created per pass by whoever owns the scene; they are
/// cheap and hold no layer references between calls.
pub trait Synchronizer {
    fn kind(&self) -> &'static str;

    fn synchronize(&mut self, layer: &dyn Layer, styles: &mut StyleReader, scene: &mut MirrorScene);

    /// Removes everything this synchronizer produced for `layer`.
    fn reset(&mut self, layer: &dyn Layer, scene: &mut MirrorScene) {
        scene.remove(layer.id());
    }
}

/// Constructor stored in the registry; instantiation and lifecycle belong
/// to the caller.
pub type SynchronizerCtor = fn() -> Box<dyn Synchronizer>;
