//! View models for the four dashboard tabs.
//!
//! Every view goes through [`query::query`] with its own criteria; nothing
//! here filters records by hand. An empty result is a normal view with
//! `empty` set, never an error.

use crate::query::{self, FilterCriteria, SortSpec, ALL_SENTINEL};
use crate::types::{ArticleRecord, Dataset};
use serde::Serialize;

/// Number of cards on the executive summary.
pub const MAJOR_MOVES_LIMIT: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub summary: String,
    pub competitor: String,
    pub category: String,
    pub business_unit: String,
    pub source: String,
    pub date: String,
}

impl From<&ArticleRecord> for ArticleCard {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            title: record.title.clone(),
            summary: record.summary.clone(),
            competitor: query::representative(&record.competitors).to_string(),
            category: record.category.clone(),
            business_unit: query::representative(&record.business_units).to_string(),
            source: record.source.clone(),
            date: record.display_date(),
        }
    }
}

/// A table row. `competitors` is left out on the competitor profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRow {
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors: Option<String>,
    pub source: String,
    pub date: String,
}

impl ArticleRow {
    fn plain(record: &ArticleRecord) -> Self {
        Self {
            title: record.title.clone(),
            category: record.category.clone(),
            competitors: None,
            source: record.source.clone(),
            date: record.display_date(),
        }
    }

    fn with_competitors(record: &ArticleRecord) -> Self {
        Self {
            competitors: Some(query::join_or_default(&record.competitors)),
            ..Self::plain(record)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub total_articles: usize,
    pub competitors: usize,
    pub categories: usize,
    pub business_units: usize,
    pub sources: usize,
}

impl ProfileStats {
    pub fn of(records: &[&ArticleRecord]) -> Self {
        Self {
            total_articles: records.len(),
            competitors: query::distinct_competitors(records.iter().copied()).len(),
            categories: query::distinct_categories(records.iter().copied()).len(),
            business_units: query::distinct_business_units(records.iter().copied()).len(),
            sources: query::count_by_source(records.iter().copied()),
        }
    }
}

/// Executive summary: the most recent matching articles as cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorMoves {
    pub filters: FilterCriteria,
    pub cards: Vec<ArticleCard>,
    pub empty: bool,
}

pub fn major_moves(dataset: &Dataset, criteria: &FilterCriteria) -> MajorMoves {
    let cards: Vec<ArticleCard> = query::query(dataset, criteria, Some(SortSpec::NewestFirst), Some(MAJOR_MOVES_LIMIT))
        .into_iter()
        .map(ArticleCard::from)
        .collect();

    MajorMoves {
        filters: criteria.clone(),
        empty: cards.is_empty(),
        cards,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorProfile {
    pub competitor: String,
    pub stats: ProfileStats,
    pub articles: Vec<ArticleRow>,
    pub empty: bool,
}

pub fn competitor_profile(dataset: &Dataset, competitor: &str) -> CompetitorProfile {
    let criteria = FilterCriteria::unconstrained().with_competitor(competitor);
    let matched = query::query(dataset, &criteria, Some(SortSpec::NewestFirst), None);

    CompetitorProfile {
        competitor: competitor.to_string(),
        stats: ProfileStats::of(&matched),
        empty: matched.is_empty(),
        articles: matched.into_iter().map(ArticleRow::plain).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessUnitProfile {
    pub business_unit: String,
    pub stats: ProfileStats,
    pub articles: Vec<ArticleRow>,
    pub empty: bool,
}

pub fn business_unit_profile(dataset: &Dataset, business_unit: &str) -> BusinessUnitProfile {
    let criteria = FilterCriteria::unconstrained().with_business_unit(business_unit);
    let matched = query::query(dataset, &criteria, Some(SortSpec::NewestFirst), None);

    BusinessUnitProfile {
        business_unit: business_unit.to_string(),
        stats: ProfileStats::of(&matched),
        empty: matched.is_empty(),
        articles: matched.into_iter().map(ArticleRow::with_competitors).collect(),
    }
}

/// Full article list under the three filters, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryUpdates {
    pub filters: FilterCriteria,
    pub articles: Vec<ArticleRow>,
    pub empty: bool,
}

pub fn industry_updates(dataset: &Dataset, criteria: &FilterCriteria) -> IndustryUpdates {
    let articles: Vec<ArticleRow> = query::query(dataset, criteria, Some(SortSpec::NewestFirst), None)
        .into_iter()
        .map(ArticleRow::with_competitors)
        .collect();

    IndustryUpdates {
        filters: criteria.clone(),
        empty: articles.is_empty(),
        articles,
    }
}

/// Distinct values of each filter dimension, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub competitors: Vec<String>,
    pub categories: Vec<String>,
    pub business_units: Vec<String>,
}

impl FilterOptions {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            competitors: query::distinct_competitors(dataset.iter()).into_iter().collect(),
            categories: query::distinct_categories(dataset.iter()).into_iter().collect(),
            business_units: query::distinct_business_units(dataset.iter()).into_iter().collect(),
        }
    }

    /// The same lists with the `All` choice in front, for selectors that
    /// allow leaving a dimension open.
    pub fn selectors(&self) -> FilterOptions {
        Self {
            competitors: with_all(&self.competitors),
            categories: with_all(&self.categories),
            business_units: with_all(&self.business_units),
        }
    }
}

fn with_all(values: &[String]) -> Vec<String> {
    std::iter::once(ALL_SENTINEL.to_string())
        .chain(values.iter().cloned())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DatasetStatus {
    NoData,
    Loaded {
        articles: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        origin: Option<String>,
    },
}

impl DatasetStatus {
    pub fn of(dataset: Option<&Dataset>) -> Self {
        match dataset {
            None => Self::NoData,
            Some(dataset) => Self::Loaded {
                articles: dataset.len(),
                origin: dataset.origin().map(str::to_string),
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoData => "Upload an Excel file to get started".to_string(),
            Self::Loaded { articles, .. } => format!("{} articles loaded", articles),
        }
    }
}
