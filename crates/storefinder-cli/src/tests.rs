use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefinder-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.proxy_url.is_none());
}

#[test]
fn parses_search_with_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "storefinder-cli",
        "search",
        "--lat",
        "-33.86",
        "--lon",
        "-151.2",
        "--radius-km",
        "5",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.lat.as_deref(), Some("-33.86"));
    assert_eq!(args.lon.as_deref(), Some("-151.2"));
    assert_eq!(args.radius_km.as_deref(), Some("5"));
    assert!(!args.use_current_location);
    assert!(!args.no_export);
    assert_eq!(
        args.output,
        std::path::PathBuf::from(storefinder_core::EXPORT_FILE_NAME)
    );
}

#[test]
fn parses_repeated_deselect() {
    let cli = Cli::try_parse_from([
        "storefinder-cli",
        "search",
        "--lat",
        "40",
        "--lon",
        "-75",
        "--radius-km",
        "5",
        "--deselect",
        "2",
        "--deselect",
        "7",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.deselect, vec![2, 7]);
}

#[test]
fn search_accepts_location_flag_without_coordinates() {
    let cli = Cli::try_parse_from([
        "storefinder-cli",
        "search",
        "--use-current-location",
        "--radius-km",
        "10",
        "--page-size",
        "20",
        "--no-export",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert!(args.use_current_location);
    assert!(args.lat.is_none());
    assert_eq!(args.page_size, Some(20));
    assert!(args.no_export);
}

#[test]
fn deselect_rejects_non_numeric_id() {
    let result = Cli::try_parse_from(["storefinder-cli", "search", "--deselect", "abc"]);
    assert!(result.is_err());
}

#[test]
fn global_proxy_url_after_subcommand() {
    let cli = Cli::try_parse_from([
        "storefinder-cli",
        "interactive",
        "--proxy-url",
        "http://proxy.local:3000",
        "--page-size",
        "50",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.proxy_url.as_deref(), Some("http://proxy.local:3000"));
    assert!(matches!(
        cli.command,
        Some(Commands::Interactive {
            page_size: Some(50)
        })
    ));
}

#[test]
fn search_rejects_zero_page_size() {
    let result = Cli::try_parse_from([
        "storefinder-cli",
        "search",
        "--radius-km",
        "5",
        "--page-size",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn interactive_rejects_zero_page_size() {
    let result = Cli::try_parse_from(["storefinder-cli", "interactive", "--page-size", "0"]);
    assert!(result.is_err());
}

#[test]
fn interactive_accepts_page_size_one() {
    let cli = Cli::try_parse_from(["storefinder-cli", "interactive", "--page-size", "1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Interactive { page_size: Some(1) })
    ));
}
