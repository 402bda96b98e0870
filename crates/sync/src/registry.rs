use std::collections::BTreeMap;

use layers::layer::Layer;

use crate::synchronizer::SynchronizerCtor;

/// Maps a layer's declared synchronizer type string to a constructor.
///
/// First registration wins: re-registering a kind is reported as an error
/// and ignored so a misbehaving plugin cannot hijack another's layers,
/// and startup is never blocked on it.
#[derive(Debug, Default)]
pub struct SynchronizerRegistry {
    ctors: BTreeMap<String, SynchronizerCtor>,
}

impl SynchronizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }

    /// Returns `true` if the registration was accepted.
    pub fn register(&mut self, kind: impl Into<String>, ctor: SynchronizerCtor) -> bool {
        let kind = kind.into();
        if self.ctors.contains_key(&kind) {
            tracing::error!("ignoring duplicate synchronizer registration for '{kind}'");
            return false;
        }
        self.ctors.insert(kind, ctor);
        true
    }

    pub fn get(&self, kind: &str) -> Option<SynchronizerCtor> {
        self.ctors.get(kind).copied()
    }

    /// Resolves the constructor for `layer`'s declared synchronizer type.
    pub fn synchronizer_for(&self, layer: &dyn Layer) -> Option<SynchronizerCtor> {
        layer.synchronizer_type().and_then(|kind| self.get(kind))
    }
}
