//! Client view state: query fields, search phase, result and selection.
//!
//! A [`ClientView`] owns all state for one search screen. Transitions:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success(result, selection)
//!                     │
//!                     └──err──▶ Failed(message)
//! Success/Failed ──submit──▶ Loading   (previous state discarded)
//! ```
//!
//! Toggles and page-size changes only apply in `Success`. Export reads the
//! current selection and never mutates state.

use std::path::Path;

use storefinder_core::{
    export_json, write_export, ExportError, QueryField, QueryInput, QueryResult, SelectionState,
    Store,
};
use thiserror::Error;

use crate::error::{ClientError, GeolocationError};
use crate::geolocation::{Geolocator, NoGeolocation, Position};
use crate::proxy::StoreSource;

/// Page sizes offered when pagination is enabled.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZES[0];

/// Prefix of every failed-search message.
pub const FETCH_FAILURE_HINT: &str =
    "Failed to fetch data. Please ensure the backend is running and accessible.";

pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported on this platform.";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("missing required fields: {}", field_list(.0))]
    IncompleteInput(Vec<QueryField>),

    #[error("a search is already in progress")]
    Busy,

    #[error("no search result loaded")]
    NoResult,

    #[error("store {0} is not in the visible result list")]
    UnknownStore(i64),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn field_list(fields: &[QueryField]) -> String {
    fields
        .iter()
        .map(|f| f.param())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Optional capabilities of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Number of stores shown and pre-selected. `None` shows every store.
    pub page_size: Option<usize>,
}

impl ViewOptions {
    #[must_use]
    pub fn paginated(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size.max(1)),
        }
    }
}

/// A loaded result with its selection. The selection only ever holds ids
/// from `result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    result: QueryResult,
    selection: SelectionState,
}

impl Loaded {
    #[must_use]
    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Success(Loaded),
    Failed(String),
}

pub struct ClientView<S, G = NoGeolocation> {
    source: S,
    geolocator: G,
    options: ViewOptions,
    input: QueryInput,
    phase: Phase,
    location_error: Option<String>,
}

impl<S: StoreSource> ClientView<S, NoGeolocation> {
    pub fn new(source: S, options: ViewOptions) -> Self {
        Self {
            source,
            geolocator: NoGeolocation,
            options,
            input: QueryInput::default(),
            phase: Phase::Idle,
            location_error: None,
        }
    }
}

impl<S, G> ClientView<S, G> {
    /// Enables "use current location" with the given provider.
    pub fn with_geolocator<G2: Geolocator>(self, geolocator: G2) -> ClientView<S, G2> {
        ClientView {
            source: self.source,
            geolocator,
            options: self.options,
            input: self.input,
            phase: self.phase,
            location_error: self.location_error,
        }
    }

    #[must_use]
    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn set_field(&mut self, field: QueryField, value: impl Into<String>) {
        self.input.set(field, value);
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// The message to show in the error banner, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => self.location_error.as_deref(),
        }
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&Loaded> {
        match &self.phase {
            Phase::Success(loaded) => Some(loaded),
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&QueryResult> {
        self.loaded().map(Loaded::result)
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        self.loaded().map(Loaded::selection)
    }

    #[must_use]
    pub fn page_size(&self) -> Option<usize> {
        self.options.page_size
    }

    /// Stores currently shown, in backend order.
    #[must_use]
    pub fn visible_stores(&self) -> &[Store] {
        let Some(result) = self.result() else {
            return &[];
        };
        let end = self
            .options
            .page_size
            .map_or(result.all_stores.len(), |n| n.min(result.all_stores.len()));
        &result.all_stores[..end]
    }

    /// Page sizes to offer: the fixed sizes plus the full count when the
    /// result is larger than the biggest fixed size.
    #[must_use]
    pub fn page_size_choices(&self) -> Vec<usize> {
        let mut choices = PAGE_SIZES.to_vec();
        if let Some(result) = self.result() {
            let total = result.all_stores.len();
            if PAGE_SIZES.iter().all(|&size| total > size) {
                choices.push(total);
            }
        }
        choices
    }

    /// Starts a search: validates the fields, discards the previous outcome
    /// and enters `Loading`. Returns the query to send.
    ///
    /// # Errors
    ///
    /// [`ViewError::IncompleteInput`] if a field is blank and
    /// [`ViewError::Busy`] while another search is in flight. Neither
    /// changes state.
    pub fn begin_submit(&mut self) -> Result<QueryInput, ViewError> {
        if self.is_loading() {
            return Err(ViewError::Busy);
        }
        let missing = self.input.missing_fields();
        if !missing.is_empty() {
            return Err(ViewError::IncompleteInput(missing));
        }

        self.location_error = None;
        self.phase = Phase::Loading;
        Ok(self.input.clone())
    }

    /// Completes a search started with [`begin_submit`](Self::begin_submit).
    ///
    /// Ignored unless the view is `Loading`.
    pub fn finish_submit(&mut self, outcome: Result<QueryResult, ClientError>) {
        if !self.is_loading() {
            return;
        }
        self.phase = match outcome {
            Ok(result) => {
                let selection = SelectionState::first_page(&result, self.options.page_size);
                tracing::debug!(
                    stores = result.all_stores.len(),
                    selected = selection.len(),
                    "search succeeded"
                );
                Phase::Success(Loaded { result, selection })
            }
            Err(e) => {
                tracing::debug!(error = %e, "search failed");
                Phase::Failed(fetch_failure_message(&e))
            }
        };
    }

    /// Flips selection of a visible store. Returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// [`ViewError::NoResult`] without a loaded result and
    /// [`ViewError::UnknownStore`] for ids outside the visible list.
    pub fn toggle(&mut self, store_id: i64) -> Result<bool, ViewError> {
        if !self.visible_stores().iter().any(|s| s.store_id == store_id) {
            return Err(if self.loaded().is_some() {
                ViewError::UnknownStore(store_id)
            } else {
                ViewError::NoResult
            });
        }
        match &mut self.phase {
            Phase::Success(loaded) => Ok(loaded.selection.toggle(store_id)),
            _ => Err(ViewError::NoResult),
        }
    }

    /// Changes the visible page size and re-selects exactly the stores on
    /// the new page.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidPageSize`] for zero.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ViewError> {
        if page_size == 0 {
            return Err(ViewError::InvalidPageSize);
        }
        self.options.page_size = Some(page_size);
        if let Phase::Success(loaded) = &mut self.phase {
            loaded.selection = SelectionState::first_page(&loaded.result, Some(page_size));
        }
        Ok(())
    }

    /// The filtered result as it would be exported.
    #[must_use]
    pub fn preview(&self) -> Option<QueryResult> {
        self.loaded()
            .map(|loaded| loaded.result.filtered(&loaded.selection))
    }

    /// Pretty JSON of the selected stores.
    ///
    /// # Errors
    ///
    /// [`ViewError::NoResult`] without a result, or [`ViewError::Export`]
    /// when nothing is selected.
    pub fn export_json(&self) -> Result<String, ViewError> {
        let loaded = self.loaded().ok_or(ViewError::NoResult)?;
        Ok(export_json(&loaded.result, &loaded.selection)?)
    }

    /// Writes the export to `path`.
    ///
    /// # Errors
    ///
    /// As [`export_json`](Self::export_json), plus write failures.
    pub fn export_to(&self, path: &Path) -> Result<(), ViewError> {
        let loaded = self.loaded().ok_or(ViewError::NoResult)?;
        write_export(path, &loaded.result, &loaded.selection)?;
        tracing::info!(
            path = %path.display(),
            stores = loaded.selection.len(),
            "exported selected stores"
        );
        Ok(())
    }
}

impl<S: StoreSource, G> ClientView<S, G> {
    /// Runs a full search against the store source.
    ///
    /// The view is borrowed mutably for the whole request, so searches are
    /// serialized. Fetch failures land in [`Phase::Failed`]; only
    /// precondition failures are returned as errors.
    ///
    /// # Errors
    ///
    /// See [`begin_submit`](Self::begin_submit).
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        let query = self.begin_submit()?;
        let outcome = self.source.nearest_stores(&query).await;
        self.finish_submit(outcome);
        Ok(())
    }
}

impl<S, G: Geolocator> ClientView<S, G> {
    /// Fills latitude and longitude from the current position.
    ///
    /// On failure the fields are left untouched and the error banner shows
    /// why. A failed search's banner is cleared first. Returns the position
    /// on success.
    pub async fn use_current_location(&mut self) -> Option<Position> {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
        self.location_error = None;
        match self.geolocator.current_position().await {
            Ok(position) => {
                self.input
                    .set(QueryField::Lat, position.latitude.to_string());
                self.input
                    .set(QueryField::Lon, position.longitude.to_string());
                Some(position)
            }
            Err(e) => {
                tracing::debug!(error = %e, "current location unavailable");
                self.location_error = Some(geolocation_failure_message(&e));
                None
            }
        }
    }
}

fn fetch_failure_message(error: &ClientError) -> String {
    let detail = error.to_string();
    let detail = if detail.trim().is_empty() {
        "Unknown error"
    } else {
        detail.as_str()
    };
    format!("{FETCH_FAILURE_HINT} Error: {detail}")
}

fn geolocation_failure_message(error: &GeolocationError) -> String {
    match error {
        GeolocationError::Unsupported => GEOLOCATION_UNSUPPORTED.to_string(),
        other => format!("Failed to get current location: {other}"),
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
