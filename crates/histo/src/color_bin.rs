use std::collections::BTreeMap;
use std::rc::Rc;

use foundation::color;

use crate::bin::{Bin, BinKey};

/// Item → color-string accessor shared across a histogram's bins.
pub type ColorFn<T> = Rc<dyn Fn(&T) -> String>;

/// A bin that also tracks how many of its items carry each color, to
/// answer "what color represents this bin" queries.
///
/// Composes a [`Bin`] rather than subclassing it; the aggregate hook runs
/// on every add/remove. When a color function is set, the counts always
/// sum to the item count.
pub struct ColorBin<T> {
    bin: Bin<T>,
    base_color: String,
    color_fn: Option<ColorFn<T>>,
    color_counts: BTreeMap<String, u64>,
}

impl<T: PartialEq> ColorBin<T> {
    pub fn new(key: BinKey, label: impl Into<String>) -> Self {
        Self {
            bin: Bin::new(key, label),
            base_color: color::DEFAULT_COLOR.to_string(),
            color_fn: None,
            color_counts: BTreeMap::new(),
        }
    }

    pub fn with_base_color(key: BinKey, label: impl Into<String>, base: impl Into<String>) -> Self {
        let mut bin = Self::new(key, label);
        bin.base_color = color::normalize(&base.into());
        bin
    }

    /// Must be called before any items are added; colors of items already
    /// present are not recounted.
    pub fn set_color_function(&mut self, f: ColorFn<T>) {
        self.color_fn = Some(f);
    }

    pub fn bin(&self) -> &Bin<T> {
        &self.bin
    }

    pub fn key(&self) -> &BinKey {
        self.bin.key()
    }

    pub fn label(&self) -> &str {
        self.bin.label()
    }

    pub fn items(&self) -> &[T] {
        self.bin.items()
    }

    pub fn count(&self) -> usize {
        self.bin.count()
    }

    pub fn is_empty(&self) -> bool {
        self.bin.is_empty()
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    pub fn set_base_color(&mut self, base: &str) {
        self.base_color = color::normalize(base);
    }

    pub fn color_counts(&self) -> &BTreeMap<String, u64> {
        &self.color_counts
    }

    pub fn add_item(&mut self, item: T) -> bool {
        let item_color = self
            .color_fn
            .as_ref()
            .map(|f| color::normalize(&f(&item)));
        if !self.bin.add_item(item) {
            return false;
        }
        if let Some(c) = item_color {
            *self.color_counts.entry(c).or_insert(0) += 1;
        }
        true
    }

    pub fn remove_item(&mut self, item: &T) -> bool {
        let item_color = self
            .color_fn
            .as_ref()
            .map(|f| color::normalize(&f(item)));
        if !self.bin.remove_item(item) {
            return false;
        }
        if let Some(c) = item_color
            && let Some(count) = self.color_counts.get_mut(&c)
        {
            *count -= 1;
            if *count == 0 {
                self.color_counts.remove(&c);
            }
        }
        true
    }

    /// The bin's representative color: the base color when empty, the
    /// single counted color when unambiguous, `""` otherwise.
    pub fn color(&self) -> String {
        if self.bin.is_empty() {
            return self.base_color.clone();
        }
        if self.color_counts.len() == 1 {
            if let Some(only) = self.color_counts.keys().next() {
                return only.clone();
            }
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::ColorBin;
    use crate::bin::BinKey;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        color: &'static str,
    }

    fn colored_bin() -> ColorBin<Item> {
        let mut bin = ColorBin::with_base_color(BinKey::from("a"), "a", "#ff00ff");
        bin.set_color_function(Rc::new(|item: &Item| item.color.to_string()));
        bin
    }

    #[test]
    fn empty_bin_reports_base_color() {
        let bin = colored_bin();
        assert_eq!(bin.color(), "#ff00ff");
    }

    #[test]
    fn single_color_is_unambiguous() {
        let mut bin = colored_bin();
        bin.add_item(Item {
            id: 1,
            color: "#ff0000",
        });
        bin.add_item(Item {
            id: 2,
            color: "RGBA(255,0,0,1)",
        });
        assert_eq!(bin.color(), "#ff0000");
        assert_eq!(bin.color_counts().get("#ff0000"), Some(&2));
    }

    #[test]
    fn mixed_colors_are_ambiguous() {
        let mut bin = colored_bin();
        bin.add_item(Item {
            id: 1,
            color: "#ff0000",
        });
        bin.add_item(Item {
            id: 2,
            color: "#00ff00",
        });
        assert_eq!(bin.color(), "");
    }

    #[test]
    fn full_removal_deletes_the_color_key() {
        let mut bin = colored_bin();
        let item = Item {
            id: 1,
            color: "#ff0000",
        };
        bin.add_item(item);
        assert!(bin.remove_item(&Item {
            id: 1,
            color: "#ff0000",
        }));
        assert!(!bin.color_counts().contains_key("#ff0000"));
        assert_eq!(bin.count(), 0);
    }

    #[test]
    fn counts_track_item_count() {
        let mut bin = colored_bin();
        for id in 0..4 {
            bin.add_item(Item {
                id,
                color: if id % 2 == 0 { "#ff0000" } else { "#00ff00" },
            });
        }
        let total: u64 = bin.color_counts().values().sum();
        assert_eq!(total, bin.count() as u64);
    }

    #[test]
    fn duplicate_add_does_not_double_count() {
        let mut bin = colored_bin();
        bin.add_item(Item {
            id: 1,
            color: "#ff0000",
        });
        bin.add_item(Item {
            id: 1,
            color: "#ff0000",
        });
        assert_eq!(bin.count(), 1);
        assert_eq!(bin.color_counts().get("#ff0000"), Some(&1));
    }
}
