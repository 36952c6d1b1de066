//! Session-wide algorithm catalog.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use sortviz_core::model::AlgorithmDescriptor;
use sortviz_core::VizError;

use crate::interfaces::BackendClient;

/// Algorithm descriptors, fetched once and then shared read-only.
#[derive(Debug, Default)]
pub struct AlgorithmCatalog {
    entries: RwLock<Option<Arc<Vec<AlgorithmDescriptor>>>>,
}

impl AlgorithmCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog that is already loaded.
    #[must_use]
    pub fn from_entries(entries: Vec<AlgorithmDescriptor>) -> Self {
        Self {
            entries: RwLock::new(Some(Arc::new(entries))),
        }
    }

    /// Fetch the list on first use; later calls return the cached list.
    pub fn load(&self, client: &dyn BackendClient) -> Result<Arc<Vec<AlgorithmDescriptor>>, VizError> {
        if let Some(entries) = self.entries.read().as_ref() {
            debug!(count = entries.len(), "algorithm catalog cache hit");
            return Ok(Arc::clone(entries));
        }

        let mut slot = self.entries.write();
        // Another caller may have loaded while we waited for the lock.
        if let Some(entries) = slot.as_ref() {
            return Ok(Arc::clone(entries));
        }
        let fetched = Arc::new(client.algorithms()?);
        info!(count = fetched.len(), "algorithm catalog loaded");
        *slot = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.entries.read().is_some()
    }

    /// Loaded entries, empty before the first successful load.
    #[must_use]
    pub fn entries(&self) -> Arc<Vec<AlgorithmDescriptor>> {
        self.entries.read().clone().unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<AlgorithmDescriptor> {
        self.entries
            .read()
            .as_ref()
            .and_then(|entries| entries.iter().find(|a| a.name == name).cloned())
    }

    /// Display label for `name`, falling back to the name itself.
    #[must_use]
    pub fn label(&self, name: &str) -> String {
        self.get(name).map_or_else(|| name.to_string(), |a| a.label)
    }

    /// Names in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries().iter().map(|a| a.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedBackend;

    #[test]
    fn loads_once() {
        let catalog = AlgorithmCatalog::new();
        let backend = ScriptedBackend::new().with_algorithms(&["bubble_sort", "merge_sort"]);
        let first = catalog.load(&backend).unwrap();
        // A second load never reaches the (now offline) backend.
        let offline = ScriptedBackend::new().offline();
        let second = catalog.load(&offline).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.names(), vec!["bubble_sort", "merge_sort"]);
    }

    #[test]
    fn failed_load_leaves_catalog_empty() {
        let catalog = AlgorithmCatalog::new();
        assert!(catalog.load(&ScriptedBackend::new().offline()).is_err());
        assert!(!catalog.is_loaded());
        assert!(catalog.entries().is_empty());
    }

    #[test]
    fn lookups() {
        let backend = ScriptedBackend::new().with_algorithms(&["merge_sort"]);
        let catalog = AlgorithmCatalog::from_entries(backend.algorithms().unwrap());
        assert_eq!(catalog.label("merge_sort"), "Merge Sort");
        assert_eq!(catalog.label("tim_sort"), "tim_sort");
        assert!(catalog.get("tim_sort").is_none());
    }
}
