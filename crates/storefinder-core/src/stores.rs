//! Store records as returned by the nearest-stores backend.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionState;

/// One retail location from a nearest-stores response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: i64,
    pub store_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the query point, computed by the backend.
    pub distance_km: f64,
}

/// A completed nearest-stores search.
///
/// `all_stores` keeps the backend's order. The backend sorts by distance by
/// convention, but nothing here relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub total_stores_found: usize,
    pub closest_store: Option<Store>,
    pub all_stores: Vec<Store>,
}

impl QueryResult {
    /// Iterates store ids in backend order.
    pub fn store_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.all_stores.iter().map(|s| s.store_id)
    }

    #[must_use]
    pub fn contains_store(&self, store_id: i64) -> bool {
        self.all_stores.iter().any(|s| s.store_id == store_id)
    }

    /// Returns the first `store_id` that appears more than once, if any.
    #[must_use]
    pub fn duplicate_store_id(&self) -> Option<i64> {
        let mut seen = HashSet::with_capacity(self.all_stores.len());
        self.store_ids().find(|id| !seen.insert(*id))
    }

    /// Restricts the result to the selected stores.
    ///
    /// `total_stores_found` becomes the filtered count and `closest_store`
    /// survives only while its id is still selected.
    #[must_use]
    pub fn filtered(&self, selection: &SelectionState) -> QueryResult {
        let all_stores: Vec<Store> = self
            .all_stores
            .iter()
            .filter(|s| selection.contains(s.store_id))
            .cloned()
            .collect();

        let closest_store = self
            .closest_store
            .as_ref()
            .filter(|s| selection.contains(s.store_id))
            .cloned();

        QueryResult {
            total_stores_found: all_stores.len(),
            closest_store,
            all_stores,
        }
    }
}
