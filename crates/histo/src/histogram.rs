use std::collections::BTreeMap;

use foundation::color;
use foundation::value::FieldValue;
use runtime::channel::Channel;

use crate::bin::BinKey;
use crate::color_bin::{ColorBin, ColorFn};
use crate::method::BinMethod;
use crate::sort::SortOrder;

/// Typed change notifications for one histogram.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramEvent {
    BinAdded { key: BinKey },
    BinChanged { key: BinKey, count: usize },
    BinRemoved { key: BinKey },
    Cleared,
}

/// Faceted bin engine over a caller-owned item set.
///
/// Items enter and leave through caller-supplied accessors; the histogram
/// never looks inside an item itself. Bins are created lazily when a key
/// is first observed, dropped when their last item leaves, and all
/// destroyed on [`clear`].
///
/// Single-threaded: callers must not mutate the histogram while iterating
/// a snapshot returned from it.
///
/// [`clear`]: Histogram::clear
pub struct Histogram<T> {
    method: Box<dyn BinMethod>,
    bins: BTreeMap<BinKey, ColorBin<T>>,
    color_fn: Option<ColorFn<T>>,
    base_color: String,
    events: Channel<HistogramEvent>,
}

impl<T: PartialEq> Histogram<T> {
    pub fn new(method: Box<dyn BinMethod>) -> Self {
        Self {
            method,
            bins: BTreeMap::new(),
            color_fn: None,
            base_color: color::DEFAULT_COLOR.to_string(),
            events: Channel::new(),
        }
    }

    pub fn method(&self) -> &dyn BinMethod {
        self.method.as_ref()
    }

    /// Must be set before any items are added; bins copy the function when
    /// they are created.
    pub fn set_color_function(&mut self, f: ColorFn<T>) {
        self.color_fn = Some(f);
    }

    pub fn set_base_color(&mut self, base: &str) {
        self.base_color = color::normalize(base);
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.bins.values().map(ColorBin::count).sum()
    }

    pub fn bin(&self, key: &BinKey) -> Option<&ColorBin<T>> {
        self.bins.get(key)
    }

    /// Bins in ascending key order.
    pub fn bins(&self) -> impl Iterator<Item = &ColorBin<T>> {
        self.bins.values()
    }

    pub fn sorted_bins(&self, order: SortOrder) -> Vec<&ColorBin<T>> {
        let cmp = order.comparator::<T>();
        let mut out: Vec<&ColorBin<T>> = self.bins.values().collect();
        out.sort_by(|a, b| cmp(a.bin(), b.bin()));
        out
    }

    pub fn add_item(&mut self, item: T, accessor: impl Fn(&T) -> FieldValue) {
        let value = accessor(&item);
        let key = self.method.bin_key(&value);

        if !self.bins.contains_key(&key) {
            let label = self.method.bin_label(&value);
            let mut bin = ColorBin::with_base_color(key.clone(), label, self.base_color.clone());
            if let Some(f) = &self.color_fn {
                bin.set_color_function(f.clone());
            }
            self.bins.insert(key.clone(), bin);
            self.events.emit(HistogramEvent::BinAdded { key: key.clone() });
        }

        if let Some(bin) = self.bins.get_mut(&key)
            && bin.add_item(item)
        {
            let count = bin.count();
            self.events.emit(HistogramEvent::BinChanged { key, count });
        }
    }

    pub fn add_items(
        &mut self,
        items: impl IntoIterator<Item = T>,
        accessor: impl Fn(&T) -> FieldValue,
    ) {
        for item in items {
            self.add_item(item, &accessor);
        }
    }

    /// Removes `item` from the bin its value maps to. Absent items and
    /// unknown bins are no-ops.
    pub fn remove_item(&mut self, item: &T, accessor: impl Fn(&T) -> FieldValue) -> bool {
        let value = accessor(item);
        let key = self.method.bin_key(&value);

        let Some(bin) = self.bins.get_mut(&key) else {
            return false;
        };
        if !bin.remove_item(item) {
            return false;
        }

        if bin.is_empty() {
            self.bins.remove(&key);
            self.events.emit(HistogramEvent::BinRemoved { key });
        } else {
            let count = bin.count();
            self.events.emit(HistogramEvent::BinChanged { key, count });
        }
        true
    }

    pub fn remove_items<'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a T>,
        accessor: impl Fn(&T) -> FieldValue,
    ) -> usize
    where
        T: 'a,
    {
        let mut removed = 0;
        for item in items {
            if self.remove_item(item, &accessor) {
                removed += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.bins.clear();
        self.events.emit(HistogramEvent::Cleared);
    }

    pub fn events(&self) -> &[HistogramEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<HistogramEvent> {
        self.events.drain()
    }
}
