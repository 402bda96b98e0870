use std::collections::BTreeMap;
use std::sync::Arc;

use foundation::color;
use serde::Serialize;

use crate::config::{FillConfig, ImageConfig, StrokeConfig, StyleConfig};
use crate::types::{
    DEFAULT_RADIUS, DEFAULT_SCALE, DEFAULT_STROKE_WIDTH, FillStyle, ImageStyle, Style, StrokeStyle,
};

/// Structural hash of a serializable config fragment.
fn hash64<T: Serialize>(value: &T) -> u64 {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    let digest = blake3::hash(&bytes);
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(out)
}

/// Memoizing cache shared by the sub-style readers.
///
/// Each distinct structural hash gets a sequential id starting at 1 (0 is
/// reserved for "absent") and a shared instance. Memoization only — style
/// identity is structural, so entries are never evicted within a reader's
/// lifetime.
#[derive(Debug)]
struct ReaderCache<S> {
    ids: BTreeMap<u64, u32>,
    styles: BTreeMap<u32, Arc<S>>,
    next_id: u32,
}

impl<S> Default for ReaderCache<S> {
    fn default() -> Self {
        Self {
            ids: BTreeMap::new(),
            styles: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<S> ReaderCache<S> {
    fn get_or_create(&mut self, hash: u64, build: impl FnOnce() -> S) -> (u32, Arc<S>) {
        if let Some(id) = self.ids.get(&hash)
            && let Some(style) = self.styles.get(id)
        {
            return (*id, style.clone());
        }

        let id = self.next_id;
        self.next_id += 1;
        let style = Arc::new(build());
        self.ids.insert(hash, id);
        self.styles.insert(id, style.clone());
        (id, style)
    }

    fn len(&self) -> usize {
        self.styles.len()
    }
}

#[derive(Debug, Default)]
pub struct FillReader {
    cache: ReaderCache<FillStyle>,
}

impl FillReader {
    pub fn get_or_create(&mut self, config: &FillConfig) -> (u32, Arc<FillStyle>) {
        self.cache
            .get_or_create(hash64(config), || build_fill(config))
    }
}

#[derive(Debug, Default)]
pub struct StrokeReader {
    cache: ReaderCache<StrokeStyle>,
}

impl StrokeReader {
    pub fn get_or_create(&mut self, config: &StrokeConfig) -> (u32, Arc<StrokeStyle>) {
        self.cache
            .get_or_create(hash64(config), || build_stroke(config))
    }
}

#[derive(Debug, Default)]
pub struct ImageReader {
    cache: ReaderCache<ImageStyle>,
}

impl ImageReader {
    pub fn get_or_create(&mut self, config: &ImageConfig) -> (u32, Arc<ImageStyle>) {
        self.cache
            .get_or_create(hash64(config), || build_image(config))
    }
}

fn build_fill(config: &FillConfig) -> FillStyle {
    FillStyle {
        color: color::normalize(config.color.as_deref().unwrap_or(color::DEFAULT_COLOR)),
    }
}

fn build_stroke(config: &StrokeConfig) -> StrokeStyle {
    StrokeStyle {
        color: color::normalize(config.color.as_deref().unwrap_or(color::DEFAULT_COLOR)),
        width: config.width.unwrap_or(DEFAULT_STROKE_WIDTH),
        line_dash: config.line_dash.clone().unwrap_or_default(),
    }
}

fn build_image(config: &ImageConfig) -> ImageStyle {
    match config {
        ImageConfig::Circle {
            radius,
            fill,
            stroke,
        } => ImageStyle::Circle {
            radius: radius.unwrap_or(DEFAULT_RADIUS),
            fill: fill.as_ref().map(build_fill),
            stroke: stroke.as_ref().map(build_stroke),
        },
        ImageConfig::Icon { src, scale, color } => ImageStyle::Icon {
            src: src.clone().unwrap_or_default(),
            scale: scale.unwrap_or(DEFAULT_SCALE),
            color: color.as_deref().map(color::normalize),
        },
    }
}

/// Resolves style configs to shared [`Style`] objects.
///
/// The composite cache key is `"{base}-{image}-{fill}-{stroke}"`: the
/// base hash covers `zIndex` and the geometry field when present, and the
/// three trailing segments are the sub-readers' cache ids (0 when that
/// sub-config is absent). At most one style object exists per distinct
/// structural config for the reader's lifetime.
#[derive(Debug, Default)]
pub struct StyleReader {
    image: ImageReader,
    fill: FillReader,
    stroke: StrokeReader,
    cache: BTreeMap<String, Arc<Style>>,
}

impl StyleReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, config: &StyleConfig) -> Arc<Style> {
        self.resolve(config).1
    }

    /// Resolves `config`, returning the composite cache key alongside the
    /// shared style.
    pub fn resolve(&mut self, config: &StyleConfig) -> (String, Arc<Style>) {
        let (image_id, image) = match &config.image {
            Some(c) => {
                let (id, style) = self.image.get_or_create(c);
                (id, Some(style))
            }
            None => (0, None),
        };
        let (fill_id, fill) = match &config.fill {
            Some(c) => {
                let (id, style) = self.fill.get_or_create(c);
                (id, Some(style))
            }
            None => (0, None),
        };
        let (stroke_id, stroke) = match &config.stroke {
            Some(c) => {
                let (id, style) = self.stroke.get_or_create(c);
                (id, Some(style))
            }
            None => (0, None),
        };

        let base = hash64(&(&config.z_index, &config.geometry));
        let key = format!("{base:016x}-{image_id}-{fill_id}-{stroke_id}");

        if let Some(style) = self.cache.get(&key) {
            return (key, style.clone());
        }

        let style = Arc::new(Style {
            geometry: config.geometry.clone(),
            z_index: config.z_index.unwrap_or(0),
            image,
            fill,
            stroke,
        });
        self.cache.insert(key.clone(), style.clone());
        (key, style)
    }

    pub fn cached_styles(&self) -> usize {
        self.cache.len()
    }

    pub fn cached_parts(&self) -> (usize, usize, usize) {
        (
            self.image.cache.len(),
            self.fill.cache.len(),
            self.stroke.cache.len(),
        )
    }
}

/// Inverse mapping: writes `style` back into `config` for round-tripping.
pub fn to_config(style: &Style, config: &mut StyleConfig) {
    config.geometry = style.geometry.clone();
    config.z_index = Some(style.z_index);
    config.image = style.image.as_deref().map(|image| match image {
        ImageStyle::Circle {
            radius,
            fill,
            stroke,
        } => ImageConfig::Circle {
            radius: Some(*radius),
            fill: fill.as_ref().map(|f| FillConfig {
                color: Some(f.color.clone()),
            }),
            stroke: stroke.as_ref().map(stroke_to_config),
        },
        ImageStyle::Icon { src, scale, color } => ImageConfig::Icon {
            src: Some(src.clone()),
            scale: Some(*scale),
            color: color.clone(),
        },
    });
    config.fill = style.fill.as_deref().map(|f| FillConfig {
        color: Some(f.color.clone()),
    });
    config.stroke = style.stroke.as_deref().map(stroke_to_config);
}

fn stroke_to_config(stroke: &StrokeStyle) -> StrokeConfig {
    StrokeConfig {
        color: Some(stroke.color.clone()),
        width: Some(stroke.width),
        line_dash: if stroke.line_dash.is_empty() {
            None
        } else {
            Some(stroke.line_dash.clone())
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::{StyleReader, to_config};
    use crate::config::{FillConfig, StyleConfig};

    fn sample_config() -> StyleConfig {
        StyleConfig::from_json(
            r##"{
                "zIndex": 2,
                "image": {"type": "circle", "radius": 4, "fill": {"color": "#ff0000"}},
                "fill": {"color": "#ff0000"},
                "stroke": {"color": "#00ff00", "width": 2}
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn identical_configs_share_one_style_object() {
        let mut reader = StyleReader::new();
        let a = reader.get_or_create(&sample_config());
        let b = reader.get_or_create(&sample_config());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reader.cached_styles(), 1);
    }

    #[test]
    fn composite_key_has_the_id_segments() {
        let mut reader = StyleReader::new();
        let (key, _) = reader.resolve(&sample_config());
        let segments: Vec<&str> = key.split('-').collect();
        assert_eq!(segments.len(), 4);
        // image, fill and stroke were all present: first ids from each cache.
        assert_eq!(&segments[1..], &["1", "1", "1"]);
    }

    #[test]
    fn absent_sub_styles_key_as_zero() {
        let mut reader = StyleReader::new();
        let (key, style) = reader.resolve(&StyleConfig {
            fill: Some(FillConfig {
                color: Some("#0000ff".to_string()),
            }),
            ..StyleConfig::default()
        });
        let segments: Vec<&str> = key.split('-').collect();
        assert_eq!(&segments[1..], &["0", "1", "0"]);
        assert!(style.image.is_none());
        assert!(style.stroke.is_none());
    }

    #[test]
    fn sub_styles_are_shared_across_styles() {
        let mut reader = StyleReader::new();
        let with_stroke = StyleConfig {
            stroke: sample_config().stroke,
            ..StyleConfig::default()
        };
        let a = reader.get_or_create(&sample_config());
        let b = reader.get_or_create(&with_stroke);
        let (sa, sb) = (a.stroke.clone().unwrap(), b.stroke.clone().unwrap());
        assert!(Arc::ptr_eq(&sa, &sb));
        assert_eq!(reader.cached_styles(), 2);
    }

    #[test]
    fn distinct_z_index_changes_the_base_segment_only() {
        let mut reader = StyleReader::new();
        let (key_a, _) = reader.resolve(&sample_config());
        let mut other = sample_config();
        other.z_index = Some(9);
        let (key_b, _) = reader.resolve(&other);

        assert_ne!(key_a, key_b);
        assert_eq!(
            key_a.split('-').skip(1).collect::<Vec<_>>(),
            key_b.split('-').skip(1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn round_trips_through_to_config() {
        let mut reader = StyleReader::new();
        let original = sample_config();
        let style = reader.get_or_create(&original);

        let mut recovered = StyleConfig::default();
        to_config(&style, &mut recovered);

        assert_eq!(recovered.z_index, Some(2));
        assert_eq!(recovered.image, original.image);
        assert_eq!(recovered.fill, original.fill);
        assert_eq!(recovered.stroke, original.stroke);

        // Resolving the recovered config hits the same cache entry.
        let again = reader.get_or_create(&recovered);
        assert!(Arc::ptr_eq(&style, &again));
    }

    #[test]
    fn malformed_config_still_produces_a_style() {
        let mut reader = StyleReader::new();
        let config = StyleConfig::from_json(r##"{"image": 42}"##).unwrap();
        let style = reader.get_or_create(&config);
        assert!(style.image.is_none());
        assert_eq!(style.z_index, 0);
    }
}
