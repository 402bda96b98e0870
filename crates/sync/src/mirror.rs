use std::collections::BTreeMap;

use layers::layer::LayerId;

/// Per-layer state mirrored into the 3D side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerMirror {
    pub visible: bool,
    /// Composite cache key of the resolved style, when the layer has one.
    pub style_key: Option<String>,
    pub primitive_count: usize,
    pub imagery_url: Option<String>,
}

/// Deterministic stand-in for the 3D scene.
///
/// Synchronizers write layer state here; the real renderer consumes it as
/// an opaque snapshot. Keyed in layer-id order so traversal is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirrorScene {
    layers: BTreeMap<LayerId, LayerMirror>,
}

impl MirrorScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerMirror> {
        self.layers.get(&id)
    }

    pub fn upsert(&mut self, id: LayerId) -> &mut LayerMirror {
        self.layers.entry(id).or_default()
    }

    pub fn remove(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }
}
