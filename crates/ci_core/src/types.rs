use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub const TITLE_MAX_CHARS: usize = 200;
pub const SUMMARY_MAX_CHARS: usize = 300;

pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_SUMMARY: &str = "No summary available";
pub const DEFAULT_SOURCE: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "Other";

/// Placeholder shown when a record carries no competitor or business unit.
pub const NOT_AVAILABLE: &str = "N/A";

/// Date format used by every view.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// One normalized news article.
///
/// Records are only built by ingestion. `title` and `summary` are already
/// capped, the tag lists never hold blank entries and keep source order,
/// and `category` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub keyword: String,
    pub title: String,
    pub summary: String,
    pub business_units: Vec<String>,
    pub competitors: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: String,
}

impl ArticleRecord {
    pub fn has_competitor(&self, competitor: &str) -> bool {
        self.competitors.iter().any(|c| c == competitor)
    }

    pub fn has_business_unit(&self, business_unit: &str) -> bool {
        self.business_units.iter().any(|b| b == business_unit)
    }

    pub fn display_date(&self) -> String {
        self.published_at.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// The records of one load, in source row order.
///
/// A dataset is never edited: a new load builds a new one and the owner
/// swaps it in whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    origin: Option<String>,
    records: Vec<ArticleRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self {
            origin: None,
            records,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Name of the file the records were read from, when known.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }
}

impl Deref for Dataset {
    type Target = [ArticleRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl FromIterator<ArticleRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ArticleRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn record(title: &str, competitors: &[&str], business_units: &[&str], category: &str) -> ArticleRecord {
        ArticleRecord {
            keyword: String::new(),
            title: title.to_string(),
            summary: format!("Summary of {}", title),
            business_units: business_units.iter().map(|s| s.to_string()).collect(),
            competitors: competitors.iter().map(|s| s.to_string()).collect(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            source: "Reuters".to_string(),
            category: category.to_string(),
        }
    }

    pub fn dated(mut record: ArticleRecord, day: u32) -> ArticleRecord {
        record.published_at = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        record
    }
}
