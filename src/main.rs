//! Projscope CLI application entry point
//!
//! Loads a project catalog (and optionally a score table used as ranking
//! source), applies the query given on the command line and prints the
//! resulting page.
//!
//! # Usage
//!
//! ```bash
//! # First page of the catalog
//! projscope --catalog projects.json
//!
//! # Search and sort, with badges from a score table
//! projscope --ranking scores.json list -s timer --sort trending --badges
//!
//! # Discovery lists
//! projscope trending -n 5
//! projscope gems
//!
//! # Print the shareable query string
//! projscope url -c games --sort az -p 2
//! ```
//!
//! # Configuration
//!
//! Defaults are read from the user's config directory
//! (`~/.config/projscope/config.toml` on Linux); flags override them.
//! Set `RUST_LOG` (or pass `--verbose`) to see log output on stderr.

use projscope::{
    ProjscopeError, catalog,
    cli::{Cli, Commands, QueryArgs},
    config::ProjscopeConfig,
    engine::VisibilityEngine,
    output::{self, OutputFormat, Row},
    query::url,
    ranking::ScoreTable,
};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, ProjscopeError>;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file named by `--config`, or the default one
///
/// A broken default config is not fatal; an explicitly requested one is.
fn load_config(cli: &Cli) -> Result<ProjscopeConfig> {
    match &cli.config {
        Some(path) => Ok(ProjscopeConfig::load_from(path)?),
        None => Ok(ProjscopeConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load configuration, using defaults");
            ProjscopeConfig::default()
        })),
    }
}

/// Build an engine from the catalog and ranking files named on the command
/// line or in the config
fn build_engine(cli: &Cli, config: &ProjscopeConfig, per_page: Option<usize>) -> Result<VisibilityEngine> {
    let catalog_path = cli
        .catalog
        .as_ref()
        .or(config.catalog.as_ref())
        .ok_or_else(|| {
            ProjscopeError::InvalidInput(
                "no catalog given; pass --catalog or set `catalog` in the config file".to_string(),
            )
        })?;
    let items = catalog::load(catalog_path)?;

    let mut builder = VisibilityEngine::builder()
        .items(items)
        .items_per_page(per_page.unwrap_or(config.items_per_page));

    if let Some(ranking_path) = cli.ranking.as_ref().or(config.ranking.as_ref()) {
        builder = builder.ranking_source(ScoreTable::load(ranking_path)?);
    }

    Ok(builder.build()?)
}

fn run_list(
    engine: &mut VisibilityEngine,
    query: &QueryArgs,
    badges: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    query.apply(engine);

    let rendered = if badges {
        let page = engine.paginated_items_with_badges();
        let rows: Vec<Row<'_>> = page.iter().map(Row::from).collect();
        output::render(&rows, format, quiet)?
    } else {
        let page = engine.paginated_items();
        let rows: Vec<Row<'_>> = page.iter().map(|item| Row::from(*item)).collect();
        output::render(&rows, format, quiet)?
    };
    print!("{rendered}");

    if format == OutputFormat::Text && !quiet {
        if engine.is_empty() {
            println!("  No projects match the current filters.");
        }
        println!("{}", output::page_summary(&engine.page_info()));
        let query_string = url::encode(engine.state());
        if !query_string.is_empty() {
            println!("?{query_string}");
        }
    }
    Ok(())
}

fn run_discovery(rows: &[Row<'_>], has_ranking: bool, format: OutputFormat, quiet: bool) -> Result<()> {
    if !has_ranking && !quiet {
        eprintln!("No ranking source configured; pass --ranking or set `ranking` in the config file.");
    }
    print!("{}", output::render(rows, format, quiet)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let quiet = cli.quiet || config.quiet;

    match cli.get_command() {
        Commands::List {
            query,
            per_page,
            badges,
            format,
        } => {
            let mut engine = build_engine(cli, &config, per_page)?;
            run_list(&mut engine, &query, badges, format.unwrap_or(config.format), quiet)
        }
        Commands::Trending { limit, format } => {
            let engine = build_engine(cli, &config, None)?;
            let trending = engine.trending_items(limit);
            let rows: Vec<Row<'_>> = trending.iter().map(Row::from).collect();
            run_discovery(&rows, engine.has_ranking_source(), format.unwrap_or(config.format), quiet)
        }
        Commands::Gems { limit, format } => {
            let engine = build_engine(cli, &config, None)?;
            let gems = engine.hidden_gems(limit);
            let rows: Vec<Row<'_>> = gems.iter().map(Row::from).collect();
            run_discovery(&rows, engine.has_ranking_source(), format.unwrap_or(config.format), quiet)
        }
        Commands::Url { query } => {
            let mut engine = VisibilityEngine::new(Vec::new());
            query.apply(&mut engine);
            println!("{}", url::encode(engine.state()));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    tracing::info!(command = ?cli.command, "projscope starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
