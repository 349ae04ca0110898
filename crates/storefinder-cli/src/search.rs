//! One-shot `search` command.

use std::path::PathBuf;

use clap::Args;
use storefinder_client::{render, Phase};
use storefinder_core::{QueryField, EXPORT_FILE_NAME};

use crate::build_view;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,
    /// Search radius in kilometres
    #[arg(long)]
    pub radius_km: Option<String>,
    /// Fill latitude/longitude from the configured position provider
    #[arg(long)]
    pub use_current_location: bool,
    /// Show and pre-select only this many stores
    #[arg(long, value_parser = crate::page_size_parser())]
    pub page_size: Option<usize>,
    /// Store id to leave out of the export (repeatable)
    #[arg(long = "deselect", value_name = "STORE_ID")]
    pub deselect: Vec<i64>,
    /// Where to write the exported selection
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    pub output: PathBuf,
    /// Print the result without writing a file
    #[arg(long)]
    pub no_export: bool,
}

/// Runs a single search and exports the selection.
///
/// Explicit `--lat`/`--lon` take precedence over a position lookup.
///
/// # Errors
///
/// Returns an error if a required field is still blank, the search fails,
/// or the export cannot be written.
pub(crate) async fn run_search(
    config: &storefinder_core::AppConfig,
    proxy_url: Option<&str>,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let mut view = build_view(config, proxy_url, args.page_size)?;

    if args.use_current_location && view.use_current_location().await.is_none() {
        if let Some(message) = view.error_message() {
            eprintln!("warning: {message}");
        }
    }

    for (field, value) in [
        (QueryField::Lat, &args.lat),
        (QueryField::Lon, &args.lon),
        (QueryField::RadiusKm, &args.radius_km),
    ] {
        if let Some(value) = value {
            view.set_field(field, value.as_str());
        }
    }

    view.submit().await?;

    if let Phase::Failed(message) = view.phase() {
        anyhow::bail!("{message}");
    }

    for &store_id in &args.deselect {
        let selected = view.selection().is_some_and(|s| s.contains(store_id));
        if selected {
            view.toggle(store_id)?;
        } else {
            tracing::warn!(store_id, "store is not selected; ignoring --deselect");
        }
    }

    println!("{}", render(&view));

    if args.no_export {
        return Ok(());
    }

    view.export_to(&args.output)?;
    println!(
        "wrote {} stores to {}",
        view.selection().map_or(0, storefinder_core::SelectionState::len),
        args.output.display()
    );
    Ok(())
}
