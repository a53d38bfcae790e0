//! Provider name → adapter lookup.

use std::collections::HashMap;

use crate::source::AdapterHandle;

/// Adapters keyed by provider name, listed in first-registration order.
#[derive(Clone, Default)]
pub struct Registry {
    adapters: HashMap<String, AdapterHandle>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `adapter` under `name`. A second registration under the
    /// same name replaces the first and keeps its position in the listing.
    pub fn register(&mut self, name: impl Into<String>, adapter: AdapterHandle) {
        let name = name.into();
        if self.adapters.insert(name.clone(), adapter).is_some() {
            tracing::debug!("Replacing adapter registered as '{}'", name);
        } else {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<AdapterHandle> {
        self.adapters.get(name).cloned()
    }

    pub fn list_providers(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.order)
            .finish()
    }
}
