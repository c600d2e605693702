use crate::types::{ArticleRecord, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selector value meaning "do not filter on this dimension".
pub const ALL_SENTINEL: &str = "All";

/// Per-query filter on the three dimensions every view exposes.
///
/// `None` leaves a dimension unconstrained. Competitor and business unit
/// match by membership in the record's tag list, category by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub competitor: Option<String>,
    pub category: Option<String>,
    pub business_unit: Option<String>,
}

impl FilterCriteria {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Builds criteria from raw selector values, where `All` or a blank
    /// value leaves the dimension open.
    pub fn from_selections(competitor: Option<&str>, category: Option<&str>, business_unit: Option<&str>) -> Self {
        Self {
            competitor: selection(competitor),
            category: selection(category),
            business_unit: selection(business_unit),
        }
    }

    pub fn with_competitor(mut self, competitor: impl Into<String>) -> Self {
        self.competitor = Some(competitor.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_business_unit(mut self, business_unit: impl Into<String>) -> Self {
        self.business_unit = Some(business_unit.into());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.competitor.is_none() && self.category.is_none() && self.business_unit.is_none()
    }

    pub fn matches(&self, record: &ArticleRecord) -> bool {
        self.competitor.as_deref().map_or(true, |c| record.has_competitor(c))
            && self.category.as_deref().map_or(true, |c| record.category == c)
            && self.business_unit.as_deref().map_or(true, |b| record.has_business_unit(b))
    }
}

/// Maps a selector value to a filter value. The `All` sentinel is never a
/// literal match value.
pub fn selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSpec {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Filters, sorts and truncates `records` without touching them.
///
/// Sorting is stable, so records with equal dates keep their dataset order.
pub fn query<'a>(
    records: &'a [ArticleRecord],
    criteria: &FilterCriteria,
    sort: Option<SortSpec>,
    limit: Option<usize>,
) -> Vec<&'a ArticleRecord> {
    let mut matched: Vec<&ArticleRecord> = records.iter().filter(|r| criteria.matches(r)).collect();

    match sort {
        Some(SortSpec::NewestFirst) => matched.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        Some(SortSpec::OldestFirst) => matched.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        None => {}
    }

    if let Some(limit) = limit {
        matched.truncate(limit);
    }

    tracing::debug!("query matched {} of {} records", matched.len(), records.len());
    matched
}

pub fn distinct_competitors<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    records
        .into_iter()
        .flat_map(|r| r.competitors.iter().cloned())
        .collect()
}

pub fn distinct_business_units<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    records
        .into_iter()
        .flat_map(|r| r.business_units.iter().cloned())
        .collect()
}

pub fn distinct_categories<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    records.into_iter().map(|r| r.category.clone()).collect()
}

/// Number of distinct `source` values.
pub fn count_by_source<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    records
        .into_iter()
        .map(|r| r.source.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn first_or_default<'a>(values: &'a [String], default: &'a str) -> &'a str {
    values.first().map(String::as_str).unwrap_or(default)
}

/// First tag of a list, or `N/A`.
pub fn representative(values: &[String]) -> &str {
    first_or_default(values, NOT_AVAILABLE)
}

/// All tags joined with `", "`, or `N/A`.
pub fn join_or_default(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{dated, record};

    #[test]
    fn test_competitor_filter_is_membership() {
        let records = vec![
            record("a", &["X", "Y"], &[], "Other"),
            record("b", &["Y"], &[], "Other"),
        ];

        let by_y = query(&records, &FilterCriteria::unconstrained().with_competitor("Y"), None, None);
        assert_eq!(by_y.len(), 2);

        let by_x = query(&records, &FilterCriteria::unconstrained().with_competitor("X"), None, None);
        assert_eq!(by_x.len(), 1);
        assert_eq!(by_x[0].title, "a");
    }

    #[test]
    fn test_category_filter_is_exact() {
        let records = vec![record("a", &[], &[], "Market Entry")];
        let criteria = FilterCriteria::unconstrained().with_category("Market");
        assert!(query(&records, &criteria, None, None).is_empty());

        let criteria = FilterCriteria::unconstrained().with_category("Market Entry");
        assert_eq!(query(&records, &criteria, None, None).len(), 1);
    }

    #[test]
    fn test_business_unit_filter_is_membership() {
        let records = vec![
            record("a", &[], &["Power", "Rail"], "Other"),
            record("b", &[], &["Water"], "Other"),
        ];
        let criteria = FilterCriteria::unconstrained().with_business_unit("Rail");
        let matched = query(&records, &criteria, None, None);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "a");
    }

    #[test]
    fn test_filters_compose_with_and() {
        let records = vec![
            record("a", &["X"], &[], "Other"),
            record("b", &["X"], &[], "Market Entry"),
            record("c", &["Y"], &[], "Other"),
        ];
        let criteria = FilterCriteria::unconstrained()
            .with_competitor("X")
            .with_category("Other");
        let matched = query(&records, &criteria, None, None);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "a");
    }

    #[test]
    fn test_unconstrained_passes_everything_in_order() {
        let records = vec![
            record("a", &[], &[], "Other"),
            record("b", &["X"], &["Power"], "Other"),
        ];
        let matched = query(&records, &FilterCriteria::unconstrained(), None, None);
        let titles: Vec<_> = matched.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_all_sentinel_is_never_a_match_value() {
        let criteria = FilterCriteria::from_selections(Some("All"), Some(" "), None);
        assert!(criteria.is_unconstrained());

        let records = vec![record("a", &["All"], &[], "Other"), record("b", &[], &[], "Other")];
        assert_eq!(query(&records, &criteria, None, None).len(), 2);

        let criteria = FilterCriteria::from_selections(Some("X"), Some("All"), Some("Rail"));
        assert_eq!(criteria.competitor.as_deref(), Some("X"));
        assert_eq!(criteria.category, None);
        assert_eq!(criteria.business_unit.as_deref(), Some("Rail"));
    }

    #[test]
    fn test_sort_newest_first_then_limit() {
        // days 1..=10 with a tie on day 8
        let mut records = Vec::new();
        for (i, day) in [3, 8, 1, 10, 5, 8, 2, 9, 4, 6].iter().enumerate() {
            records.push(dated(record(&format!("r{}", i), &[], &[], "Other"), *day));
        }

        let top = query(&records, &FilterCriteria::unconstrained(), Some(SortSpec::NewestFirst), Some(7));
        let titles: Vec<_> = top.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["r3", "r7", "r1", "r5", "r9", "r4", "r8"]);
        assert!(top.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[test]
    fn test_sort_oldest_first() {
        let records = vec![
            dated(record("late", &[], &[], "Other"), 20),
            dated(record("early", &[], &[], "Other"), 2),
        ];
        let sorted = query(&records, &FilterCriteria::unconstrained(), Some(SortSpec::OldestFirst), None);
        assert_eq!(sorted[0].title, "early");
        // the input is untouched
        assert_eq!(records[0].title, "late");
    }

    #[test]
    fn test_limit_larger_than_matches() {
        let records = vec![record("a", &[], &[], "Other")];
        assert_eq!(query(&records, &FilterCriteria::unconstrained(), None, Some(7)).len(), 1);
        assert!(query(&records, &FilterCriteria::unconstrained(), None, Some(0)).is_empty());
    }

    #[test]
    fn test_distinct_helpers() {
        let empty: Vec<ArticleRecord> = Vec::new();
        assert!(distinct_competitors(&empty).is_empty());

        let records = vec![
            record("a", &["X"], &["Power", "Rail"], "Other"),
            record("b", &[], &["Rail"], "Market Entry"),
        ];
        assert_eq!(distinct_competitors(&records), BTreeSet::from(["X".to_string()]));
        assert_eq!(
            distinct_business_units(&records).into_iter().collect::<Vec<_>>(),
            vec!["Power", "Rail"]
        );
        assert_eq!(distinct_categories(&records).len(), 2);
        assert_eq!(count_by_source(&records), 1);
    }

    #[test]
    fn test_distinct_over_subset() {
        let records = vec![
            record("a", &["X"], &[], "Other"),
            record("b", &["Y"], &[], "Other"),
        ];
        let subset = query(&records, &FilterCriteria::unconstrained().with_competitor("Y"), None, None);
        let competitors = distinct_competitors(subset.iter().copied());
        assert_eq!(competitors.into_iter().collect::<Vec<_>>(), vec!["Y"]);
    }

    #[test]
    fn test_representative_labels() {
        let tags = vec!["Acme".to_string(), "Globex".to_string()];
        assert_eq!(representative(&tags), "Acme");
        assert_eq!(representative(&[]), "N/A");
        assert_eq!(first_or_default(&[], "none"), "none");
        assert_eq!(join_or_default(&tags), "Acme, Globex");
        assert_eq!(join_or_default(&[]), "N/A");
    }
}
