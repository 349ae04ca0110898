//! Line-oriented search session.
//!
//! Each input line is one command; the view is re-rendered after every
//! command that changes it.

use std::io::Write as _;
use std::path::PathBuf;

use storefinder_client::render;
use storefinder_core::{QueryField, EXPORT_FILE_NAME};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{build_view, CliView};

const HELP: &str = "\
commands:
  lat <value>        set latitude
  lon <value>        set longitude
  radius <value>     set radius in km
  locate             use current location
  submit             run the search
  toggle <store_id>  select/deselect a store
  page <n|all>       change the visible page size
  show               redraw the view
  export [path]      write selected stores (default stores_result.json)
  help               show this help
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageChoice {
    Size(usize),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Set(QueryField, String),
    Locate,
    Submit,
    Toggle(i64),
    Page(PageChoice),
    Show,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Parses one input line. Blank lines parse as [`Command::Show`].
pub(crate) fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{word}'"));
    }

    let value = |name: &str| -> Result<String, String> {
        arg.map(ToOwned::to_owned)
            .ok_or_else(|| format!("'{name}' needs a value"))
    };

    match word {
        "lat" => Ok(Command::Set(QueryField::Lat, value("lat")?)),
        "lon" => Ok(Command::Set(QueryField::Lon, value("lon")?)),
        "radius" => Ok(Command::Set(QueryField::RadiusKm, value("radius")?)),
        "locate" => Ok(Command::Locate),
        "submit" => Ok(Command::Submit),
        "toggle" => value("toggle")?
            .parse::<i64>()
            .map(Command::Toggle)
            .map_err(|e| format!("invalid store id: {e}")),
        "page" => match value("page")?.as_str() {
            "all" => Ok(Command::Page(PageChoice::All)),
            raw => raw
                .parse::<usize>()
                .map(|n| Command::Page(PageChoice::Size(n)))
                .map_err(|e| format!("invalid page size: {e}")),
        },
        "show" => Ok(Command::Show),
        "export" => Ok(Command::Export(arg.map(PathBuf::from))),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Applies one command. Returns `false` when the session should end.
async fn apply(view: &mut CliView, command: Command) -> bool {
    match command {
        Command::Set(field, value) => view.set_field(field, value),
        Command::Locate => {
            if let Some(position) = view.use_current_location().await {
                tracing::info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "using current location"
                );
            }
        }
        Command::Submit => {
            println!("Loading...");
            if let Err(e) = view.submit().await {
                println!("! {e}");
                return true;
            }
        }
        Command::Toggle(store_id) => {
            if let Err(e) = view.toggle(store_id) {
                println!("! {e}");
                return true;
            }
        }
        Command::Page(choice) => {
            let size = match choice {
                PageChoice::Size(n) => n,
                PageChoice::All => match view.result() {
                    Some(result) => result.all_stores.len().max(1),
                    None => {
                        println!("! no search result loaded");
                        return true;
                    }
                },
            };
            if let Err(e) = view.set_page_size(size) {
                println!("! {e}");
                return true;
            }
        }
        Command::Show => {}
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            match view.export_to(&path) {
                Ok(()) => println!("wrote {}", path.display()),
                Err(e) => println!("! {e}"),
            }
            return true;
        }
        Command::Help => {
            println!("{HELP}");
            return true;
        }
        Command::Quit => return false,
    }

    println!("{}", render(&*view));
    true
}

/// Runs the session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the view cannot be built or stdin/stdout fail.
pub(crate) async fn run_interactive(
    config: &storefinder_core::AppConfig,
    proxy_url: Option<&str>,
    page_size: Option<usize>,
) -> anyhow::Result<()> {
    let mut view = build_view(config, proxy_url, page_size)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&view));
    println!("type 'help' for commands");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(command) => {
                if !apply(&mut view, command).await {
                    break;
                }
            }
            Err(message) => println!("! {message}"),
        }
    }

    Ok(())
}
