use std::collections::BTreeMap;

use foundation::color::{self, Rgb};

/// How bins receive their representative colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMethod {
    /// Every bin gets the reset/base color.
    Reset,
    /// Evenly spaced ramp across the bins in display order.
    AutoGradient { start: Rgb, end: Rgb },
    /// Base color unless a manual override exists.
    Manual,
}

/// Assigns a deterministic color per bin label.
///
/// Manual overrides always win, on top of whichever method is active, so
/// a user-picked bin color survives switching between auto schemes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorModel {
    method: ColorMethod,
    manual: BTreeMap<String, String>,
    base_color: String,
}

impl ColorModel {
    pub fn new(method: ColorMethod) -> Self {
        Self {
            method,
            manual: BTreeMap::new(),
            base_color: color::DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_base_color(method: ColorMethod, base: &str) -> Self {
        let mut model = Self::new(method);
        model.base_color = color::normalize(base);
        model
    }

    pub fn method(&self) -> &ColorMethod {
        &self.method
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    pub fn set_manual_color(&mut self, label: impl Into<String>, value: &str) {
        self.manual.insert(label.into(), color::normalize(value));
    }

    pub fn clear_manual_colors(&mut self) {
        self.manual.clear();
    }

    pub fn manual_colors(&self) -> &BTreeMap<String, String> {
        &self.manual
    }

    /// Colors for `labels` in their display order.
    pub fn colors_for(&self, labels: &[&str]) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();

        match &self.method {
            ColorMethod::Reset | ColorMethod::Manual => {
                for label in labels {
                    out.insert((*label).to_string(), self.base_color.clone());
                }
            }
            ColorMethod::AutoGradient { start, end } => {
                let ramp = color::gradient(*start, *end, labels.len());
                for (label, rgb) in labels.iter().zip(ramp) {
                    out.insert((*label).to_string(), rgb.to_hex_string());
                }
            }
        }

        for (label, value) in &self.manual {
            if out.contains_key(label) {
                out.insert(label.clone(), value.clone());
            }
        }

        out
    }
}
