//! The provider directory: feature name to constructor.

use crate::error::StatusError;
use crate::provider::{Provider, ProviderFactory};
use fxhash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

/// Registration table populated once at startup, before any round runs.
///
/// The directory is built explicitly by the entry point (see the `wsb` facade) and is
/// read-only afterwards.
#[derive(Default, Clone)]
pub struct Directory {
    entries: FxHashMap<String, ProviderFactory>,
}

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider constructor under `name`.
    ///
    /// # Panics
    /// Registering the same name twice is a programming error and panics, naming the
    /// feature.
    #[must_use]
    #[track_caller]
    pub fn register<F, P>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: Provider + 'static,
    {
        match self.entries.entry(name.into()) {
            Entry::Occupied(entry) => {
                panic!("feature \"{}\" is already registered", entry.key());
            }
            Entry::Vacant(entry) => {
                let factory: ProviderFactory =
                    Arc::new(move || Arc::new(factory()) as Arc<dyn Provider>);
                entry.insert(factory);
            }
        }
        self
    }

    /// Instantiates a fresh provider for `name`.
    ///
    /// # Errors
    /// [`StatusError::UnknownFeature`] if nothing is registered under `name`.
    pub fn create(&self, name: &str) -> Result<Arc<dyn Provider>, StatusError> {
        self.entries.get(name).map(|factory| factory()).ok_or_else(|| StatusError::UnknownFeature {
            name: name.to_owned(),
            context: None,
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory").field("features", &self.names()).finish()
    }
}
