use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::bin::Bin;

/// Sort orders over bins. Each maps to one of the six comparators below.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    CountAsc,
    CountDesc,
    KeyAsc,
    KeyDesc,
    LabelAsc,
    LabelDesc,
}

impl SortOrder {
    pub fn comparator<T: PartialEq>(self) -> fn(&Bin<T>, &Bin<T>) -> Ordering {
        match self {
            SortOrder::CountAsc => by_count,
            SortOrder::CountDesc => by_count_desc,
            SortOrder::KeyAsc => by_key,
            SortOrder::KeyDesc => by_key_desc,
            SortOrder::LabelAsc => by_label,
            SortOrder::LabelDesc => by_label_desc,
        }
    }
}

pub fn by_count<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    a.count().cmp(&b.count())
}

pub fn by_key<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    a.key().cmp(b.key())
}

/// Labels that both match the float pattern compare numerically, so
/// "9", "10", "11" order as values rather than lexically. Anything else
/// falls back to string comparison.
pub fn by_label<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    compare_labels(a.label(), b.label())
}

// Descending variants mirror the ascending ones by swapping arguments,
// so the two directions cannot drift apart.

pub fn by_count_desc<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    by_count(b, a)
}

pub fn by_key_desc<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    by_key(b, a)
}

pub fn by_label_desc<T: PartialEq>(a: &Bin<T>, b: &Bin<T>) -> Ordering {
    by_label(b, a)
}

pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let float = float_pattern();
    if float.is_match(a) && float.is_match(b) {
        if let (Ok(na), Ok(nb)) = (a.parse::<f64>(), b.parse::<f64>()) {
            return na.total_cmp(&nb);
        }
    }
    a.cmp(b)
}

fn float_pattern() -> &'static Regex {
    static FLOAT: OnceLock<Regex> = OnceLock::new();
    FLOAT.get_or_init(|| {
        Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("valid float pattern")
    })
}
