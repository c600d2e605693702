use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use ci_core::types::{
    ArticleRecord, Dataset, DEFAULT_CATEGORY, DEFAULT_SOURCE, DEFAULT_SUMMARY, DEFAULT_TITLE, SUMMARY_MAX_CHARS,
    TITLE_MAX_CHARS,
};

use crate::readers::{CellValue, RawRow};

/// Column names of the source sheet.
pub mod columns {
    pub const SBU: &str = "SBU";
    pub const COMPETITOR: &str = "Competitor";
    pub const KEYWORD: &str = "keyword";
    pub const TITLE: &str = "newstitle";
    pub const SUMMARY: &str = "summary";
    pub const PUBLISHED: &str = "publishedate";
    pub const SOURCE: &str = "source";
    pub const CATEGORY: &str = "category";
}

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y", "%d %B %Y", "%B %d, %Y", "%b %d, %Y"];

/// Builds one record per row, keeping row order.
pub fn normalize(rows: &[RawRow]) -> Dataset {
    rows.iter().map(normalize_row).collect()
}

pub fn normalize_row(row: &RawRow) -> ArticleRecord {
    ArticleRecord {
        keyword: text(row, columns::KEYWORD)
            .map(|k| k.trim().to_string())
            .unwrap_or_default(),
        title: truncate_chars(
            &text(row, columns::TITLE).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            TITLE_MAX_CHARS,
        ),
        summary: truncate_chars(
            &text(row, columns::SUMMARY).unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            SUMMARY_MAX_CHARS,
        ),
        business_units: split_tags(row.get(columns::SBU)),
        competitors: split_tags(row.get(columns::COMPETITOR)),
        // evaluated per row: rows without a usable date get distinct timestamps
        published_at: parse_published(row.get(columns::PUBLISHED)).unwrap_or_else(Utc::now),
        source: trimmed_or(row, columns::SOURCE, DEFAULT_SOURCE),
        category: trimmed_or(row, columns::CATEGORY, DEFAULT_CATEGORY),
    }
}

fn text(row: &RawRow, column: &str) -> Option<String> {
    row.get(column).map(|v| v.to_string())
}

fn trimmed_or(row: &RawRow, column: &str, default: &str) -> String {
    text(row, column)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Splits a comma-separated tag cell, trimming each part and dropping blanks.
pub fn split_tags(value: Option<&CellValue>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(value) => value
            .to_string()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Hard cut at `max` characters.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

pub fn parse_published(value: Option<&CellValue>) -> Option<DateTime<Utc>> {
    match value? {
        CellValue::DateTime(dt) => Some(dt.and_utc()),
        CellValue::Number(serial) => excel_serial(*serial),
        CellValue::Text(text) => parse_date_text(text.trim()),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc())
}

/// Days since 1899-12-30, the Excel epoch.
fn excel_serial(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch
        .checked_add_signed(Duration::milliseconds(millis))
        .map(|dt| dt.and_utc())
}
