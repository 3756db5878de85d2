//! Output formatting for CLI display
//!
//! Rows are rendered as coloured text lines, pretty JSON or CSV. A row is a
//! catalog item plus whatever the ranking source contributed to it (a badge
//! for list views, a score for the discovery lists).

use crate::engine::{BadgedItem, PageInfo, ScoredItem};
use crate::item::Item;
use crate::ranking::Badge;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize, Serializer, ser};
use serde_json::Value;
use std::fmt::Write;
use thiserror::Error;

/// Output format for item listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

/// Errors that can occur while rendering output
#[derive(Debug, Error)]
pub enum OutputError {
    /// JSON serialization failed
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendered bytes were not UTF-8
    #[error("Output encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// One line of output
///
/// In JSON a present badge or score replaces the record field of the same
/// name; absent ones are left out.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Catalog item
    pub item: &'a Item,
    /// Badge from the ranking source
    pub badge: Option<&'a Badge>,
    /// Score from a discovery query
    pub score: Option<f64>,
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = Vec::new();
        if let Some(badge) = self.badge {
            let badge = serde_json::to_value(badge).map_err(<S::Error as ser::Error>::custom)?;
            fields.push(("badge", badge));
        }
        if let Some(score) = self.score {
            fields.push(("score", Value::from(score)));
        }
        self.item
            .to_json_object(fields)
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'a> From<&'a Item> for Row<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            item,
            badge: None,
            score: None,
        }
    }
}

impl<'a> From<&'a BadgedItem<'a>> for Row<'a> {
    fn from(badged: &'a BadgedItem<'a>) -> Self {
        Self {
            item: badged.item,
            badge: badged.badge.as_ref(),
            score: None,
        }
    }
}

impl<'a> From<&'a ScoredItem<'a>> for Row<'a> {
    fn from(scored: &'a ScoredItem<'a>) -> Self {
        Self {
            item: scored.item,
            badge: None,
            score: Some(scored.score),
        }
    }
}

/// Render rows in the requested format
///
/// In quiet text mode only titles are printed, one per line.
///
/// # Errors
///
/// Returns `OutputError` if JSON or CSV serialization fails.
pub fn render(rows: &[Row<'_>], format: OutputFormat, quiet: bool) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(rows, quiet)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => render_csv(rows),
    }
}

fn render_text(rows: &[Row<'_>], quiet: bool) -> String {
    let mut out = String::new();
    for row in rows {
        if quiet {
            out.push_str(&row.item.title);
        } else {
            out.push_str(&text_line(row));
        }
        out.push('\n');
    }
    out
}

/// Format a single row as a coloured text line
#[must_use]
pub fn text_line(row: &Row<'_>) -> String {
    let item = row.item;
    let mut line = format!("  {}", item.title.bold());

    if let Some(category) = &item.category {
        let _ = write!(line, " [{}]", category.cyan());
    }
    if let Some(rating) = item.rating {
        let _ = write!(line, " {}", format!("★ {rating:.1}").yellow());
    }
    if let Some(date) = item.date_added {
        let _ = write!(line, " {}", date.format("%Y-%m-%d").to_string().dimmed());
    }
    if let Some(badge) = row.badge {
        let _ = write!(line, " {}", format!("«{}»", badge.label).magenta());
    }
    if let Some(score) = row.score {
        let _ = write!(line, " {}", format!("score {score:.2}").green());
    }
    line
}

fn render_csv(rows: &[Row<'_>]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "identifier",
        "title",
        "category",
        "rating",
        "date_added",
        "badge",
        "score",
    ])?;

    for row in rows {
        let item = row.item;
        writer.write_record([
            item.identifier().to_string(),
            item.title.clone(),
            item.category.clone().unwrap_or_default(),
            item.rating.map(|r| r.to_string()).unwrap_or_default(),
            item.date_added
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.badge.map(|b| b.label.clone()).unwrap_or_default(),
            row.score.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Format the page position line shown under a listing
#[must_use]
pub fn page_summary(info: &PageInfo) -> String {
    let noun = if info.total_items == 1 { "item" } else { "items" };
    format!(
        "Page {} of {} ({} {noun}, {} per page)",
        info.page, info.total_pages, info.total_items, info.items_per_page
    )
}
