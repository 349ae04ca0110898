mod interactive;
mod search;

use clap::{CommandFactory, Parser, Subcommand};
use storefinder_client::{ClientView, ConfiguredGeolocator, ProxyClient, ViewOptions};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "storefinder-cli")]
#[command(about = "Find nearby stores through the store finder proxy")]
struct Cli {
    /// Proxy server base URL (defaults to `STOREFINDER_PROXY_URL`)
    #[arg(long, global = true)]
    proxy_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search, apply deselections, and export the selection
    Search(SearchArgs),
    /// Start a line-oriented search session
    Interactive {
        /// Show and pre-select only this many stores
        #[arg(long, value_parser = page_size_parser())]
        page_size: Option<usize>,
    },
}

/// Page sizes must be at least 1.
pub(crate) fn page_size_parser() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
}

pub(crate) type CliView = ClientView<ProxyClient, ConfiguredGeolocator>;

/// Builds a view wired to the configured proxy and position provider.
///
/// A CLI page size wins over `STOREFINDER_PAGE_SIZE`.
pub(crate) fn build_view(
    config: &storefinder_core::AppConfig,
    proxy_url: Option<&str>,
    page_size: Option<usize>,
) -> anyhow::Result<CliView> {
    let proxy_url = proxy_url.unwrap_or(&config.proxy_url);
    let client = ProxyClient::new(proxy_url)
        .map_err(|e| anyhow::anyhow!("failed to build proxy client: {e}"))?;
    let geolocator = ConfiguredGeolocator::from_url(config.geolocation_url.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to build geolocation client: {e}"))?;

    let options = match page_size.or(config.page_size) {
        Some(n) => ViewOptions::paginated(n),
        None => ViewOptions::default(),
    };

    tracing::debug!(%proxy_url, ?options, "client view ready");
    Ok(ClientView::new(client, options).with_geolocator(geolocator))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    dotenvy::dotenv().ok();
    let config = storefinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Search(args) => {
            search::run_search(&config, cli.proxy_url.as_deref(), &args).await?;
        }
        Commands::Interactive { page_size } => {
            interactive::run_interactive(&config, cli.proxy_url.as_deref(), page_size).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
