//! Catalog item model
//!
//! An [`Item`] is one entry of the browsable collection. The engine reads only
//! a handful of fields (title, category, date, rating and the identifier
//! fields); everything else in the source record is carried in [`Item::extra`]
//! so decorated output can reproduce the full record.
//!
//! # Identifier resolution
//!
//! [`Item::identifier`] resolves to the first non-empty value of `folder`,
//! `name`, `title`. It is the join key between catalog items and ranking
//! data, so changing the priority order silently breaks trending sort, badge
//! lookup and the discovery queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single project in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display title, used for search and alphabetical sort
    pub title: String,

    /// Category token (compared case-insensitively)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When the item was added to the catalog
    #[serde(
        default,
        deserialize_with = "deserialize_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<DateTime<Utc>>,

    /// User rating; missing ratings sort as 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Folder name, highest priority identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Project name, second priority identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Fields the engine does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Create an item with only a title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            date_added: None,
            rating: None,
            folder: None,
            name: None,
            extra: Map::new(),
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the date the item was added
    #[must_use]
    pub const fn with_date_added(mut self, date: DateTime<Utc>) -> Self {
        self.date_added = Some(date);
        self
    }

    /// Set the rating
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the folder identifier
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Set the name identifier
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Resolve the identifier used to join with ranking data
    ///
    /// Priority is `folder`, then `name`, then `title`; empty strings are
    /// skipped.
    #[must_use]
    pub fn identifier(&self) -> &str {
        [self.folder.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or(&self.title)
    }

    /// Lower-cased category, if any
    #[must_use]
    pub fn category_key(&self) -> Option<String> {
        self.category.as_deref().map(str::to_lowercase)
    }

    /// Rating with missing values treated as 0
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// The item as a JSON object with `fields` set on top
    ///
    /// A field replaces any record field of the same name, so decorating an
    /// item never produces duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the item does not serialize to an object.
    pub fn to_json_object<I>(&self, fields: I) -> Result<Map<String, Value>, serde_json::Error>
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        let mut object = match serde_json::to_value(self)? {
            Value::Object(object) => object,
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "item serialized to a non-object value: {other}"
                )));
            }
        };
        for (key, value) in fields {
            object.insert(key.to_string(), value);
        }
        Ok(object)
    }
}

/// Parse a catalog date
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (taken as
/// midnight UTC). Anything else yields `None`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Non-string or unparseable dates are treated as missing.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_date))
}
