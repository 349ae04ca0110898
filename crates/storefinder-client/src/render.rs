//! Plain-text rendering of a [`ClientView`] for terminals.

use storefinder_core::{Store, EXPORT_FILE_NAME};

use crate::view::ClientView;

/// One checkbox line: `[x] Name (ID: 1, 1.2 km)`.
#[must_use]
pub fn store_line(store: &Store, selected: bool) -> String {
    format!(
        "[{}] {} (ID: {}, {} km)",
        if selected { 'x' } else { ' ' },
        store.store_name,
        store.store_id,
        store.distance_km
    )
}

/// Renders the whole view: fields, status, and the result section.
#[must_use]
pub fn render<S, G>(view: &ClientView<S, G>) -> String {
    let input = view.input();
    let mut lines = vec![
        "Find Nearest Stores".to_string(),
        format!("Latitude: {}", input.lat),
        format!("Longitude: {}", input.lon),
        format!("Radius (km): {}", input.radius_km),
    ];

    if view.is_loading() {
        lines.push("Loading...".to_string());
    }

    if let Some(message) = view.error_message() {
        lines.push(String::new());
        lines.push(format!("! {message}"));
    }

    if let Some(loaded) = view.loaded() {
        let result = loaded.result();
        let selection = loaded.selection();

        lines.push(String::new());
        lines.push(format!("Result (Total found: {})", result.total_stores_found));

        if let Some(page_size) = view.page_size() {
            let choices: Vec<String> = view
                .page_size_choices()
                .iter()
                .map(|n| {
                    if *n == result.all_stores.len() && !crate::view::PAGE_SIZES.contains(n) {
                        format!("All ({n})")
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            lines.push(format!(
                "Show only: {page_size} [{}]",
                choices.join(", ")
            ));
        }

        lines.push("Select stores to include in download:".to_string());
        lines.extend(
            view.visible_stores()
                .iter()
                .map(|s| format!("  {}", store_line(s, selection.contains(s.store_id)))),
        );

        if let Ok(preview) = serde_json::to_string_pretty(&result.filtered(selection)) {
            lines.push(preview);
        }

        if selection.is_empty() {
            lines.push("Download disabled: no stores selected".to_string());
        } else {
            lines.push(format!(
                "Download {} selected as {EXPORT_FILE_NAME}",
                selection.len()
            ));
        }
    }

    lines.join("\n")
}
