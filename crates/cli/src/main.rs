//! Pantry CLI: recipe search from the command line.
//!
//! - `pantry build-index`: batch-build the n-gram index artifact
//! - `pantry search [QUERY] [-f KIND=TEXT]...`: run one search
//! - `pantry inventory FIELD [QUERY] [-f KIND=TEXT]... [--narrow TEXT]`
//! - `pantry init`: write a default `pantry.toml`

mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::ArgMatches;
use pantry_core::{Collection, Field, KeywordKind};
use pantry_search::{
    narrow_inventory, NgramIndex, PantryConfig, QueryState, Searcher, CONFIG_FILE_NAME,
};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_inventory, format_message, format_outcome, OutputMode};

const DEFAULT_INDEX_PATH: &str = "data/index.json";

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if let Err(e) = run(&matches, mode) {
        eprintln!("{}", format_error(&e, mode));
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pantry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<()> {
    if matches.subcommand_name() == Some("init") {
        PantryConfig::write_default_if_missing(Path::new(CONFIG_FILE_NAME))?;
        let message = format!("{} ready", CONFIG_FILE_NAME);
        println!("{}", format_message(&message, mode));
        return Ok(());
    }

    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("build-index", sub)) => {
            let output = sub
                .get_one::<String>("output")
                .map(PathBuf::from)
                .or_else(|| config.index.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH));

            let collection = Collection::from_path(&config.recipes)
                .with_context(|| format!("loading {}", config.recipes.display()))?;
            let index = NgramIndex::build(&collection);
            index
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;

            let message = format!(
                "Indexed {} recipes into {} n-grams at {}",
                collection.len(),
                index.len(),
                output.display()
            );
            println!("{}", format_message(&message, mode));
        }
        Some(("search", sub)) => {
            let searcher = open_searcher(&config)?;
            let state = query_state(sub)?;
            println!("{}", format_outcome(&searcher.search(&state), mode));
        }
        Some(("inventory", sub)) => {
            let field: Field = sub
                .get_one::<String>("field")
                .map(String::as_str)
                .unwrap_or_default()
                .parse()?;
            let searcher = open_searcher(&config)?;
            let state = query_state(sub)?;

            let values = searcher.inventory(&state, field);
            let typed = sub
                .get_one::<String>("narrow")
                .map(String::as_str)
                .unwrap_or("");
            let shown = narrow_inventory(&values, typed);
            println!("{}", format_inventory(&shown, mode));
        }
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given"),
    }
    Ok(())
}

/// Config file (explicit, else `./pantry.toml` if present, else defaults)
/// with command-line overrides applied
fn load_config(matches: &ArgMatches) -> anyhow::Result<PantryConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => PantryConfig::from_file(Path::new(path))?,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            PantryConfig::from_file(Path::new(CONFIG_FILE_NAME))?
        }
        None => PantryConfig::default(),
    };

    if let Some(recipes) = matches.get_one::<String>("recipes") {
        config = config.with_recipes(recipes);
    }
    if let Some(index) = matches.get_one::<String>("index") {
        config = config.with_index(index);
    }
    if matches.get_flag("no-cache") {
        config = config.with_cache(false);
    }
    config.validate()?;

    tracing::debug!(
        target: "pantry::cli",
        recipes = %config.recipes.display(),
        index = ?config.index,
        cache = config.cache,
        "Configuration loaded"
    );
    Ok(config)
}

fn open_searcher(config: &PantryConfig) -> anyhow::Result<Searcher> {
    Searcher::from_config(config)
        .with_context(|| format!("opening recipes at {}", config.recipes.display()))
}

fn query_state(sub: &ArgMatches) -> anyhow::Result<QueryState> {
    let mut state = QueryState::new();
    if let Some(query) = sub.get_one::<String>("query") {
        state.set_main(query.as_str());
    }
    if let Some(filters) = sub.get_many::<String>("filter") {
        for raw in filters {
            let (kind, text) = parse_filter(raw)?;
            state.add_keyword(text, kind);
        }
    }
    Ok(state)
}

/// Parse `KIND=TEXT` into a typed filter
fn parse_filter(raw: &str) -> anyhow::Result<(KeywordKind, &str)> {
    let Some((kind, text)) = raw.split_once('=') else {
        bail!("filter '{}' must look like KIND=TEXT", raw);
    };
    let kind: KeywordKind = kind.trim().parse()?;
    if kind == KeywordKind::Main {
        bail!("use the positional QUERY for the main keyword");
    }
    Ok((kind, text))
}
