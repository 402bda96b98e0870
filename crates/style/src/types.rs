use std::sync::Arc;

/// Resolved, renderer-native style objects.
///
/// Flat structs combined by embedding; sub-parts are shared `Arc`s handed
/// out by the reader caches, so two styles built from configs with the
/// same fill share one `FillStyle`.

pub const DEFAULT_RADIUS: f64 = 5.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    /// Normalized `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    /// Empty means solid.
    pub line_dash: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageStyle {
    Circle {
        radius: f64,
        fill: Option<FillStyle>,
        stroke: Option<StrokeStyle>,
    },
    Icon {
        src: String,
        scale: f64,
        color: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub geometry: Option<String>,
    pub z_index: i32,
    pub image: Option<Arc<ImageStyle>>,
    pub fill: Option<Arc<FillStyle>>,
    pub stroke: Option<Arc<StrokeStyle>>,
}
