use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::Country;

/// Memo of country records keyed by upper-case ISO code.
///
/// Cloning shares the underlying map, so one cache can back several clients.
/// Entries live until [`CountryCache::clear`] is called or the last clone is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct CountryCache {
    inner: Arc<RwLock<HashMap<String, Country>>>,
}

impl CountryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<Country> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&code.to_ascii_uppercase())
            .cloned()
    }

    /// Stores `country` under `code`, replacing any previous entry.
    pub fn insert(&self, code: &str, country: Country) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(code.to_ascii_uppercase(), country);
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
