//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for projscope using the `clap` crate
//! and converts the parsed query flags into engine operations.
//!
//! # Commands
//!
//! - **list**: Show one page of the catalog under a query (default)
//! - **trending**: Show the ranking source's trending items
//! - **gems**: Show the ranking source's hidden gems
//! - **url**: Print the query string for a query
//!
//! # Examples
//!
//! ```bash
//! # First page, default order
//! projscope --catalog projects.json
//!
//! # Games and science, best rated first, page 2
//! projscope list -c games -c science --sort rating-high --page 2
//!
//! # Restore a shared link, then narrow it further
//! projscope list --url "category=tools&sort=az" --search timer
//! ```

use crate::engine::{DEFAULT_HIDDEN_GEMS_LIMIT, DEFAULT_TRENDING_LIMIT, VisibilityEngine};
use crate::output::OutputFormat;
use crate::query::{SortMode, url};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse a project catalog with search, category filters, sorting and paging
#[derive(Parser, Debug)]
#[command(name = "projscope", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog JSON file (overrides config)
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Score table JSON file used as ranking source (overrides config)
    #[arg(long = "ranking", value_name = "FILE", global = true)]
    pub ranking: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Query flags shared by `list` and `url`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Seed the query from a URL query string (flags below are applied after)
    #[arg(long = "url", value_name = "QUERY")]
    pub url: Option<String>,

    /// Free-text search on titles
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Toggle a category (repeatable: -c games -c tools; "all" clears)
    #[arg(short = 'c', long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Restrict to a named collection
    #[arg(long = "collection", value_name = "ID")]
    pub collection: Option<String>,

    /// Sort mode: default, az, za, newest, trending, rating-high, rating-low
    #[arg(long = "sort", value_name = "MODE")]
    pub sort: Option<SortMode>,

    /// Page number (1-based)
    #[arg(short = 'p', long = "page", value_name = "N")]
    pub page: Option<usize>,
}

impl QueryArgs {
    /// Apply the flags to an engine, in the order a user would click them
    ///
    /// The URL seed goes first, then search, categories, collection and sort;
    /// the page is applied last because the other mutators reset it.
    pub fn apply(&self, engine: &mut VisibilityEngine) {
        if let Some(query) = &self.url {
            engine.replace_state(url::decode(query));
        }
        if let Some(search) = &self.search {
            engine.set_search_query(search);
        }
        for category in &self.categories {
            engine.toggle_category(category);
        }
        if let Some(collection) = &self.collection {
            engine.set_collection(Some(collection.clone()));
        }
        if let Some(sort) = self.sort {
            engine.set_sort_mode(sort);
        }
        if let Some(page) = self.page {
            engine.set_page(page);
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show one page of the catalog (default)
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Items per page (overrides config)
        #[arg(long = "per-page", value_name = "N")]
        per_page: Option<usize>,

        /// Include ranking badges
        #[arg(short = 'b', long = "badges")]
        badges: bool,

        /// Output format (overrides config)
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show trending items from the ranking source
    #[command(visible_alias = "t")]
    Trending {
        /// Maximum number of items
        #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_TRENDING_LIMIT)]
        limit: usize,

        /// Output format (overrides config)
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show hidden gems from the ranking source
    #[command(visible_alias = "g")]
    Gems {
        /// Maximum number of items
        #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_HIDDEN_GEMS_LIMIT)]
        limit: usize,

        /// Output format (overrides config)
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the URL query string for a query
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            query: QueryArgs::default(),
            per_page: None,
            badges: false,
            format: None,
        })
    }
}
