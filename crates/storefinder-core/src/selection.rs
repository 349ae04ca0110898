use std::collections::BTreeSet;

use crate::stores::QueryResult;

/// Store ids chosen for export.
///
/// Only meaningful alongside the [`QueryResult`] it was built from; callers
/// replace it whenever the result changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    ids: BTreeSet<i64>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Selects the first `limit` stores of `result`, or every store when
    /// `limit` is `None`.
    #[must_use]
    pub fn first_page(result: &QueryResult, limit: Option<usize>) -> Self {
        let take = limit.unwrap_or(usize::MAX);
        Self::from_ids(result.store_ids().take(take))
    }

    /// Flips membership of `store_id` and reports whether it is now selected.
    pub fn toggle(&mut self, store_id: i64) -> bool {
        if self.ids.remove(&store_id) {
            false
        } else {
            self.ids.insert(store_id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, store_id: i64) -> bool {
        self.ids.contains(&store_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::Store;

    fn result_with(ids: &[i64]) -> QueryResult {
        let all_stores: Vec<Store> = ids
            .iter()
            .map(|&id| Store {
                store_id: id,
                store_name: format!("Store {id}"),
                latitude: 0.0,
                longitude: 0.0,
                distance_km: 0.0,
            })
            .collect();
        QueryResult {
            total_stores_found: all_stores.len(),
            closest_store: all_stores.first().cloned(),
            all_stores,
        }
    }

    #[test]
    fn toggle_twice_restores_previous_state() {
        let mut selection = SelectionState::from_ids([1, 2, 3]);
        let before = selection.clone();

        assert!(!selection.toggle(2));
        assert!(selection.toggle(2));
        assert_eq!(selection, before);

        assert!(selection.toggle(4));
        assert!(!selection.toggle(4));
        assert_eq!(selection, before);
    }

    #[test]
    fn first_page_without_limit_selects_everything() {
        let result = result_with(&[3, 1, 2]);
        let selection = SelectionState::first_page(&result, None);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn first_page_respects_backend_order() {
        let result = result_with(&[30, 10, 20, 40]);
        let selection = SelectionState::first_page(&result, Some(2));
        assert!(selection.contains(30));
        assert!(selection.contains(10));
        assert!(!selection.contains(20));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn first_page_of_empty_result_is_empty() {
        let selection = SelectionState::first_page(&result_with(&[]), Some(10));
        assert!(selection.is_empty());
    }
}
