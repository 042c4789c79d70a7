use super::*;

use poiscan_scan::CacheDecision;

use crate::scan::parse_answer;

#[test]
fn help_is_answered_by_the_parser() {
    let err = Cli::try_parse_from(["poiscan", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["poiscan"]).is_err());
}

#[test]
fn parses_key_set() {
    let cli = Cli::try_parse_from(["poiscan", "key", "set", "abc123"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Key {
            command: KeyCommands::Set { ref key }
        } if key == "abc123"
    ));
}

#[test]
fn parses_key_clear() {
    let cli = Cli::try_parse_from(["poiscan", "key", "clear"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Key {
            command: KeyCommands::Clear
        }
    ));
}

#[test]
fn scan_defaults_to_asking_about_cache() {
    let cli = Cli::try_parse_from([
        "poiscan",
        "scan",
        "--url",
        "https://www.google.com/maps/@40.7,-74.0,14z",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Scan {
            ref url,
            cache: CacheMode::Ask
        } if url.contains("@40.7,-74.0,14z")
    ));
}

#[test]
fn scan_cache_modes_parse() {
    for (flag, mode) in [
        ("ask", CacheMode::Ask),
        ("use", CacheMode::Use),
        ("fresh", CacheMode::Fresh),
    ] {
        let cli =
            Cli::try_parse_from(["poiscan", "scan", "--url", "u", "--cache", flag]).unwrap();
        assert!(
            matches!(cli.command, Commands::Scan { cache, .. } if cache == mode),
            "--cache {flag}"
        );
    }
}

#[test]
fn scan_requires_url() {
    assert!(Cli::try_parse_from(["poiscan", "scan"]).is_err());
}

#[test]
fn unknown_cache_mode_is_rejected() {
    assert!(Cli::try_parse_from(["poiscan", "scan", "--url", "u", "--cache", "maybe"]).is_err());
}

#[test]
fn parses_whitelist_add() {
    let cli = Cli::try_parse_from(["poiscan", "whitelist", "add", "ChIJ123"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Whitelist {
            command: WhitelistCommands::Add { ref id }
        } if id == "ChIJ123"
    ));
}

#[test]
fn parses_blacklist_add_and_remove() {
    let cli = Cli::try_parse_from(["poiscan", "blacklist", "add", "gas_station"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Blacklist {
            command: BlacklistCommands::Add { ref type_tag }
        } if type_tag == "gas_station"
    ));

    let cli = Cli::try_parse_from(["poiscan", "blacklist", "remove", "bus_stop"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Blacklist {
            command: BlacklistCommands::Remove { ref type_tag }
        } if type_tag == "bus_stop"
    ));
}

#[test]
fn parses_cache_show_index() {
    let cli = Cli::try_parse_from(["poiscan", "cache", "show", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Cache {
            command: CacheCommands::Show { index: 3 }
        }
    ));
}

#[test]
fn cache_show_rejects_non_numeric_index() {
    assert!(Cli::try_parse_from(["poiscan", "cache", "show", "latest"]).is_err());
}

#[test]
fn answer_no_fetches_fresh() {
    assert_eq!(parse_answer("n\n"), CacheDecision::FetchFresh);
    assert_eq!(parse_answer(" No "), CacheDecision::FetchFresh);
}

#[test]
fn other_answers_use_cache() {
    assert_eq!(parse_answer("\n"), CacheDecision::UseCache);
    assert_eq!(parse_answer("y"), CacheDecision::UseCache);
    assert_eq!(parse_answer("yes"), CacheDecision::UseCache);
}

#[test]
fn max_age_converts_seconds() {
    assert_eq!(max_age_from_secs(1800).unwrap(), TimeDelta::minutes(30));
    assert_eq!(max_age_from_secs(0).unwrap(), TimeDelta::zero());
}

#[test]
fn max_age_out_of_range_is_an_error() {
    assert!(max_age_from_secs(u64::MAX).is_err());
}
