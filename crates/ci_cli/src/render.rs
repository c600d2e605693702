//! Plain-text output for the one-shot view commands.

use ci_core::views::{
    ArticleRow, BusinessUnitProfile, CompetitorProfile, FilterOptions, IndustryUpdates, MajorMoves, ProfileStats,
};
use std::fmt::Write;

const NO_MATCH: &str = "No articles match your filters\n";

pub fn major_moves(view: &MajorMoves) -> String {
    if view.empty {
        return NO_MATCH.to_string();
    }

    let mut out = String::from("Major Moves\n\n");
    for card in &view.cards {
        let _ = writeln!(out, "{}", card.title);
        let _ = writeln!(out, "  {}", card.summary);
        let _ = writeln!(out, "  [{}] [{}] [{}]", card.competitor, card.category, card.business_unit);
        let _ = writeln!(out, "  {} • {}\n", card.source, card.date);
    }
    out
}

pub fn competitor_profile(view: &CompetitorProfile) -> String {
    let mut out = format!("Competitor: {}\n", view.competitor);
    stats(&mut out, &view.stats, false);
    if view.empty {
        out.push_str("No articles found for this competitor\n");
    } else {
        rows(&mut out, &view.articles);
    }
    out
}

pub fn business_unit_profile(view: &BusinessUnitProfile) -> String {
    let mut out = format!("Business unit: {}\n", view.business_unit);
    stats(&mut out, &view.stats, true);
    if view.empty {
        out.push_str("No articles found for this business unit\n");
    } else {
        rows(&mut out, &view.articles);
    }
    out
}

pub fn industry_updates(view: &IndustryUpdates) -> String {
    if view.empty {
        return NO_MATCH.to_string();
    }
    let mut out = String::new();
    rows(&mut out, &view.articles);
    out
}

pub fn filter_options(options: &FilterOptions) -> String {
    format!(
        "Competitors: {}\nNews types: {}\nBusiness units: {}\n",
        options.competitors.join(", "),
        options.categories.join(", "),
        options.business_units.join(", ")
    )
}

fn stats(out: &mut String, stats: &ProfileStats, with_competitors: bool) {
    let _ = writeln!(out, "  Total articles: {}", stats.total_articles);
    if with_competitors {
        let _ = writeln!(out, "  Competitors: {}", stats.competitors);
    } else {
        let _ = writeln!(out, "  Business units: {}", stats.business_units);
    }
    let _ = writeln!(out, "  News types: {}", stats.categories);
    let _ = writeln!(out, "  News sources: {}\n", stats.sources);
}

fn rows(out: &mut String, rows: &[ArticleRow]) {
    for row in rows {
        match &row.competitors {
            Some(competitors) => {
                let _ = writeln!(out, "{} | {} | {} | {} | {}", row.date, row.category, competitors, row.source, row.title);
            }
            None => {
                let _ = writeln!(out, "{} | {} | {} | {}", row.date, row.category, row.source, row.title);
            }
        }
    }
}
