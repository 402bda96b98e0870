use style::config::StyleConfig;

use crate::feature::Feature;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// Synchronizer type strings layers declare themselves with.
pub const SYNCHRONIZER_VECTOR: &str = "vector";
pub const SYNCHRONIZER_TILE: &str = "tile";

pub trait Layer {
    fn id(&self) -> LayerId;

    fn title(&self) -> &str;

    /// The synchronizer kind that can mirror this layer into a 3D scene,
    /// or `None` for 2D-only layers.
    fn synchronizer_type(&self) -> Option<&str>;

    fn visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn style_config(&self) -> Option<&StyleConfig>;

    /// Tile url template for imagery layers.
    fn imagery_url(&self) -> Option<&str> {
        None
    }

    fn features(&self) -> &[Feature] {
        &[]
    }

    fn features_mut(&mut self) -> &mut [Feature] {
        &mut []
    }
}
