//! Backend-agnostic fetch filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter key every driver must honor: page-size cap.
pub const PER_PAGE: &str = "per_page";
/// Category name/id filter, forwarded where the platform supports it.
pub const CATEGORY: &str = "category";
/// Platform-native status filter.
pub const STATUS: &str = "status";
/// Free-text search filter.
pub const SEARCH: &str = "search";

/// Open-ended mapping of fetch filter keys to values.
///
/// Drivers must honor [`PER_PAGE`] when supplied and silently ignore any key
/// they do not support. The map is ordered so forwarded query strings are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchFilters(BTreeMap<String, String>);

impl FetchFilters {
    /// An empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a filter, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a filter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a filter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `per_page` cap, when supplied and parseable.
    #[must_use]
    pub fn per_page(&self) -> Option<u32> {
        self.get(PER_PAGE).and_then(|v| v.parse().ok())
    }

    /// Whether no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FetchFilters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
