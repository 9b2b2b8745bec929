//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("pantry")
        .about("N-gram recipe search")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./pantry.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("recipes")
                .long("recipes")
                .help("Recipe collection, overrides the config file")
                .global(true),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .help("Precomputed index artifact, overrides the config file")
                .global(true),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Do not memoize main-keyword results")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log queries and index activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_index())
        .subcommand(build_search())
        .subcommand(build_inventory())
        .subcommand(build_init())
}

// =========================================================================
// Index
// =========================================================================

fn build_index() -> Command {
    Command::new("build-index")
        .about("Build the n-gram index and write it as a JSON artifact")
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Artifact path (default: configured index, else data/index.json)"),
        )
}

// =========================================================================
// Search
// =========================================================================

fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .short('f')
        .help("Typed filter KIND=TEXT, KIND one of ingredient, appliance, tool")
        .action(ArgAction::Append)
}

fn build_search() -> Command {
    Command::new("search")
        .about("Search recipes by free text and typed filters")
        .arg(Arg::new("query").help("Main keyword (empty: no text constraint)"))
        .arg(filter_arg())
}

// =========================================================================
// Inventory
// =========================================================================

fn build_inventory() -> Command {
    Command::new("inventory")
        .about("List distinct values of a field over the matching recipes")
        .arg(
            Arg::new("field")
                .required(true)
                .help("ingredient, appliance or tool"),
        )
        .arg(Arg::new("query").help("Main keyword restricting the recipes"))
        .arg(filter_arg())
        .arg(
            Arg::new("narrow")
                .long("narrow")
                .help("Keep only values containing this text"),
        )
}

// =========================================================================
// Init
// =========================================================================

fn build_init() -> Command {
    Command::new("init").about("Write a default pantry.toml if none exists")
}
