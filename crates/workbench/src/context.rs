use std::collections::BTreeMap;
use std::rc::Rc;

use histo::color_model::ColorModel;
use histo::histogram::Histogram;
use histo::method::BinMethod;
use layers::feature::{Feature, FeatureId};
use layers::layer::{Layer, LayerId, SYNCHRONIZER_TILE, SYNCHRONIZER_VECTOR};
use layers::tile::TileLayer;
use layers::vector::VectorLayer;
use style::reader::StyleReader;
use sync::mirror::MirrorScene;
use sync::registry::SynchronizerRegistry;
use sync::tile::TileSynchronizer;
use sync::vector::VectorSynchronizer;

/// Explicitly constructed application context.
///
/// Everything the engine needs — layer set, style reader, synchronizer
/// registry, mirror scene — lives here and is threaded through operations
/// by reference. No hidden global state; tests construct as many
/// independent workbenches as they like.
pub struct Workbench {
    layers: Vec<Box<dyn Layer>>,
    styles: StyleReader,
    synchronizers: SynchronizerRegistry,
    scene: MirrorScene,
}

impl Workbench {
    /// A workbench with the built-in synchronizers registered.
    pub fn new() -> Self {
        let mut synchronizers = SynchronizerRegistry::new();
        synchronizers.register(SYNCHRONIZER_VECTOR, || Box::new(VectorSynchronizer::new()));
        synchronizers.register(SYNCHRONIZER_TILE, || Box::new(TileSynchronizer::new()));

        Self {
            layers: Vec::new(),
            styles: StyleReader::new(),
            synchronizers,
            scene: MirrorScene::new(),
        }
    }

    pub fn styles(&mut self) -> &mut StyleReader {
        &mut self.styles
    }

    pub fn synchronizers(&mut self) -> &mut SynchronizerRegistry {
        &mut self.synchronizers
    }

    pub fn scene(&self) -> &MirrorScene {
        &self.scene
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn add_vector_layer(&mut self, layer: VectorLayer) -> LayerId {
        let id = layer.id();
        self.layers.push(Box::new(layer));
        id
    }

    pub fn add_tile_layer(&mut self, layer: TileLayer) -> LayerId {
        let id = layer.id();
        self.layers.push(Box::new(layer));
        id
    }

    pub fn layer(&self, id: LayerId) -> Option<&dyn Layer> {
        self.layers
            .iter()
            .find(|l| l.id() == id)
            .map(|l| l.as_ref())
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Box<dyn Layer>> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Removes the layer and its mirrored scene state.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(pos) = self.layers.iter().position(|l| l.id() == id) else {
            return false;
        };
        self.layers.remove(pos);
        self.scene.remove(id);
        true
    }

    /// Mirrors every layer with a registered synchronizer into the scene.
    ///
    /// Constructors come from the registry; instances live only for the
    /// pass.
    pub fn sync_scene(&mut self) {
        for layer in &self.layers {
            let Some(ctor) = self.synchronizers.synchronizer_for(layer.as_ref()) else {
                continue;
            };
            let mut synchronizer = ctor();
            synchronizer.synchronize(layer.as_ref(), &mut self.styles, &mut self.scene);
        }
    }

    /// Builds a histogram over a layer's features, faceted by `field`.
    ///
    /// Features are snapshotted into the histogram; the per-item color
    /// accessor reads the feature's current display color.
    pub fn histogram(
        &self,
        layer_id: LayerId,
        field: &str,
        method: Box<dyn BinMethod>,
    ) -> Option<Histogram<Feature>> {
        let layer = self.layer(layer_id)?;

        let mut histogram = Histogram::new(method);
        histogram.set_color_function(Rc::new(|f: &Feature| f.color().to_string()));

        let field = field.to_string();
        histogram.add_items(layer.features().iter().cloned(), move |f| f.property(&field));
        Some(histogram)
    }

    /// Applies a color model to the layer through a histogram on `field`:
    /// every feature receives its bin's color. Returns the number of
    /// features updated.
    pub fn apply_color_model(
        &mut self,
        layer_id: LayerId,
        field: &str,
        method: Box<dyn BinMethod>,
        model: &ColorModel,
    ) -> usize {
        let Some(histogram) = self.histogram(layer_id, field, method) else {
            return 0;
        };

        // Assign per-bin colors in key order, then fan out to features.
        let bins: Vec<&histo::color_bin::ColorBin<Feature>> = histogram.bins().collect();
        let labels: Vec<&str> = bins.iter().map(|b| b.label()).collect();
        let colors = model.colors_for(&labels);

        let mut by_feature: BTreeMap<FeatureId, String> = BTreeMap::new();
        for bin in &bins {
            let Some(color) = colors.get(bin.label()) else {
                continue;
            };
            for feature in bin.items() {
                by_feature.insert(feature.id(), color.clone());
            }
        }

        let Some(layer) = self.layer_mut(layer_id) else {
            return 0;
        };
        let mut updated = 0;
        for feature in layer.features_mut() {
            if let Some(color) = by_feature.get(&feature.id()) {
                feature.set_color(color);
                updated += 1;
            }
        }
        updated
    }

}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use foundation::color::Rgb;
    use foundation::value::FieldValue;
    use histo::color_model::{ColorMethod, ColorModel};
    use histo::method::NumericBinMethod;
    use histo::sort::SortOrder;
    use layers::feature::{Feature, FeatureId};
    use layers::layer::LayerId;
    use layers::tile::TileLayer;
    use layers::vector::VectorLayer;
    use style::config::StyleConfig;

    use super::Workbench;

    fn tracks_layer() -> VectorLayer {
        let config = StyleConfig::from_json(r##"{"fill": {"color": "#336699"}}"##).unwrap();
        let mut layer = VectorLayer::with_style(LayerId(1), "tracks", config);
        for (id, speed) in [(1u64, 3.0), (2, 7.0), (3, 14.0), (4, 23.0)] {
            let mut feature = Feature::new(FeatureId(id));
            feature.set_property("speed", FieldValue::Number(speed));
            layer.add_feature(feature);
        }
        layer
    }

    #[test]
    fn sync_scene_mirrors_every_registered_layer() {
        let mut workbench = Workbench::new();
        workbench.add_vector_layer(tracks_layer());
        workbench.add_tile_layer(TileLayer::new(LayerId(2), "basemap", "https://t/{z}"));

        workbench.sync_scene();
        assert_eq!(workbench.scene().len(), 2);
        let mirror = workbench.scene().layer(LayerId(1)).unwrap();
        assert_eq!(mirror.primitive_count, 4);
        assert!(mirror.style_key.is_some());
    }

    #[test]
    fn removing_a_layer_clears_its_mirror() {
        let mut workbench = Workbench::new();
        workbench.add_vector_layer(tracks_layer());
        workbench.sync_scene();
        assert!(workbench.remove_layer(LayerId(1)));
        assert!(workbench.scene().is_empty());
        assert!(!workbench.remove_layer(LayerId(1)));
    }

    #[test]
    fn histogram_facets_layer_features() {
        let mut workbench = Workbench::new();
        workbench.add_vector_layer(tracks_layer());

        let histogram = workbench
            .histogram(LayerId(1), "speed", Box::new(NumericBinMethod::new(10.0, 0.0)))
            .unwrap();
        let counts: Vec<usize> = histogram
            .sorted_bins(SortOrder::KeyAsc)
            .iter()
            .map(|b| b.count())
            .collect();
        assert_eq!(counts, vec![2, 1, 1]);
    }

    #[test]
    fn color_model_flows_back_into_bin_colors() {
        let mut workbench = Workbench::new();
        workbench.add_vector_layer(tracks_layer());

        let model = ColorModel::new(ColorMethod::AutoGradient {
            start: Rgb::new(0, 0, 0),
            end: Rgb::new(255, 0, 0),
        });
        let updated = workbench.apply_color_model(
            LayerId(1),
            "speed",
            Box::new(NumericBinMethod::new(10.0, 0.0)),
            &model,
        );
        assert_eq!(updated, 4);

        // Re-binning now shows one unambiguous color per bin.
        let histogram = workbench
            .histogram(LayerId(1), "speed", Box::new(NumericBinMethod::new(10.0, 0.0)))
            .unwrap();
        for bin in histogram.bins() {
            assert_ne!(bin.color(), "");
        }
        let colors: Vec<String> = histogram.bins().map(|b| b.color()).collect();
        assert_eq!(colors, vec!["#000000", "#800000", "#ff0000"]);
    }

    #[test]
    fn histogram_for_unknown_layer_is_none() {
        let workbench = Workbench::new();
        assert!(
            workbench
                .histogram(LayerId(99), "speed", Box::new(NumericBinMethod::default()))
                .is_none()
        );
    }
}
