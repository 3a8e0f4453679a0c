//! Command-line interface for deskentry
//! Inspects desktop entry files and prints the standard XDG directories.
//!
//! Usage:
//!   deskentry groups `<file>`                                  - List the groups of a file
//!   deskentry get `<file>` `<key>` [--section S] [--locale L] [--raw] - Print one value
//!   deskentry dump `<file>` [--format plain|json]              - Print every group and key
//!   deskentry paths --types                                  - List location types
//!   deskentry paths `<type>`                                   - Print the directories of a type
//!
//! Configuration is read from `$XDG_CONFIG_HOME/deskentry/config.toml` when present, then from
//! `--config`; command line flags win over both.

mod commands;

use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use deskentry_config::{DeskentryConfig, Loader};
use deskentry_parser::DesktopEntry;
use deskentry_paths::StandardPaths;
use tracing_subscriber::EnvFilter;

use commands::GetOptions;

fn build_cli() -> Command {
    Command::new("deskentry")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting desktop entry files and XDG directories")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter used when RUST_LOG is unset (e.g. 'debug', 'deskentry_parser=trace')")
                .global(true),
        )
        .subcommand(
            Command::new("groups")
                .about("List the groups of a desktop entry file")
                .arg(Arg::new("file").help("Path to the desktop entry file").required(true)),
        )
        .subcommand(
            Command::new("get")
                .about("Print the value of a key, exit code 1 when it is missing")
                .arg(Arg::new("file").help("Path to the desktop entry file").required(true))
                .arg(Arg::new("key").help("Key to look up").required(true))
                .arg(
                    Arg::new("section")
                        .long("section")
                        .short('s')
                        .help("Group to look in (default from config, 'Desktop Entry')"),
                )
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .short('l')
                        .help("Locale key: 'default', 'system', 'empty' or a locale like 'de_DE'"),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Print the value without unescaping")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Print every group with its keys")
                .arg(Arg::new("file").help("Path to the desktop entry file").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["plain", "json"]),
                ),
        )
        .subcommand(
            Command::new("paths")
                .about("Print the directories of a standard location type")
                .arg(
                    Arg::new("type")
                        .help("Location type, see --types")
                        .required_unless_present("types"),
                )
                .arg(
                    Arg::new("types")
                        .long("types")
                        .help("List available location types")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });
    init_logging(&config.logging.level);

    match matches.subcommand() {
        Some(("groups", sub)) => handle_groups_command(sub),
        Some(("get", sub)) => handle_get_command(sub, &config),
        Some(("dump", sub)) => handle_dump_command(sub, &config),
        Some(("paths", sub)) => handle_paths_command(sub, &config),
        _ => unreachable!("subcommand_required is set"),
    }
}

/// Defaults, then the user file, then `--config`, then flags.
fn load_config(matches: &ArgMatches) -> Result<DeskentryConfig, deskentry_config::ConfigError> {
    let user_file = StandardPaths::new()
        .config_home()
        .join("deskentry")
        .join("config.toml");
    let mut loader = Loader::new().with_optional_file(user_file);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let sub = matches.subcommand().map(|(_, sub)| sub);
    let flag = |name: &str| {
        sub.and_then(|sub| sub.try_get_one::<String>(name).ok().flatten())
            .cloned()
    };
    loader
        .set_override_option("logging.level", matches.get_one::<String>("log-level").cloned())?
        .set_override_option("query.section", flag("section"))?
        .set_override_option("query.locale", flag("locale"))?
        .set_override_option("output.format", flag("format"))?
        .build()
}

/// Logs go to stderr. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|e| {
            eprintln!("Invalid log level '{}': {}", level, e);
            EnvFilter::new("warn")
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the file named by the `file` argument, warning about a non-clean status.
fn load_entry(matches: &ArgMatches) -> DesktopEntry {
    let path = matches
        .get_one::<String>("file")
        .expect("file is a required argument");
    let entry = DesktopEntry::load(path);
    if !entry.status().is_ok() {
        eprintln!("Warning: {}: {}", path, entry.status());
    }
    entry
}

/// Handle the groups command
fn handle_groups_command(matches: &ArgMatches) {
    let entry = load_entry(matches);
    print!("{}", commands::groups(&entry));
}

/// Handle the get command
fn handle_get_command(matches: &ArgMatches, config: &DeskentryConfig) {
    let entry = load_entry(matches);
    let key = matches
        .get_one::<String>("key")
        .expect("key is a required argument");
    let options = GetOptions {
        key,
        section: &config.query.section,
        locale: &config.query.locale,
        raw: matches.get_flag("raw"),
    };

    match commands::get(&entry, &options) {
        Some(value) => println!("{}", value),
        None => {
            tracing::debug!(key, section = options.section, "key not found");
            process::exit(1);
        }
    }
}

/// Handle the dump command
fn handle_dump_command(matches: &ArgMatches, config: &DeskentryConfig) {
    let entry = load_entry(matches);
    let output = commands::dump(&entry, config.output.format).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        process::exit(1);
    });
    print!("{}", output);
}

/// Handle the paths command
fn handle_paths_command(matches: &ArgMatches, config: &DeskentryConfig) {
    if matches.get_flag("types") {
        print!("{}", commands::location_types());
        return;
    }

    let name = matches
        .get_one::<String>("type")
        .expect("type is required unless listing types");
    print!(
        "{}",
        commands::locations(&StandardPaths::new(), name, &config.paths)
    );
}
