// file: src/search/ranking.rs
// description: result ordering and the score to percentage display mapping

use crate::models::{SearchResult, SuggestionItem};
use std::cmp::Ordering;

/// Scores in `[lower, lower + span)` map linearly onto
/// `[base, base + width)` percent.
#[derive(Debug, Clone, Copy)]
pub struct PercentageBand {
    pub lower: f64,
    pub span: f64,
    pub base: f64,
    pub width: f64,
}

/// Highest band first. The top band keeps growing past its span and is
/// capped at 100.
pub const PERCENTAGE_BANDS: [PercentageBand; 6] = [
    PercentageBand { lower: 1000.0, span: 10000.0, base: 95.0, width: 5.0 },
    PercentageBand { lower: 100.0, span: 900.0, base: 80.0, width: 15.0 },
    PercentageBand { lower: 50.0, span: 50.0, base: 60.0, width: 20.0 },
    PercentageBand { lower: 10.0, span: 40.0, base: 30.0, width: 30.0 },
    PercentageBand { lower: 1.0, span: 9.0, base: 10.0, width: 20.0 },
    PercentageBand { lower: 0.0, span: 1.0, base: 0.0, width: 10.0 },
];

pub fn relevance_percentage(score: f64) -> u8 {
    if score.is_nan() || score <= 0.0 {
        return 0;
    }

    let percentage = PERCENTAGE_BANDS
        .iter()
        .find(|band| score >= band.lower)
        .map(|band| band.base + (score - band.lower) / band.span * band.width)
        .unwrap_or(0.0);

    percentage.min(100.0).floor() as u8
}

/// Highest score first. Stable, so equal scores keep merge order.
pub fn rank_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
}

/// Most frequent first, then by suggestion type priority. Stable.
pub fn rank_suggestions(items: &mut [SuggestionItem]) {
    items.sort_by(|a, b| match b.count.cmp(&a.count) {
        Ordering::Equal => a.kind.priority().cmp(&b.kind.priority()),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionType;

    #[test]
    fn test_band_edges() {
        assert_eq!(relevance_percentage(-1.0), 0);
        assert_eq!(relevance_percentage(0.0), 0);
        assert_eq!(relevance_percentage(0.5), 5);
        assert_eq!(relevance_percentage(1.0), 10);
        assert_eq!(relevance_percentage(5.5), 20);
        assert_eq!(relevance_percentage(10.0), 30);
        assert_eq!(relevance_percentage(30.0), 45);
        assert_eq!(relevance_percentage(50.0), 60);
        assert_eq!(relevance_percentage(100.0), 80);
        assert_eq!(relevance_percentage(1000.0), 95);
        assert_eq!(relevance_percentage(6000.0), 97);
        assert_eq!(relevance_percentage(50_000.0), 100);
        assert_eq!(relevance_percentage(f64::NAN), 0);
    }

    #[test]
    fn test_percentage_is_monotonic() {
        let mut previous = 0;
        let mut score = 0.0;
        while score < 12_000.0 {
            let current = relevance_percentage(score);
            assert!(current >= previous, "dropped at score {score}");
            previous = current;
            score += 0.25;
        }
    }

    #[test]
    fn test_rank_suggestions_breaks_ties_by_type() {
        let item = |text: &str, count, kind| SuggestionItem {
            text: text.to_string(),
            count,
            kind,
        };
        let mut items = vec![
            item("vergisi", 1, SuggestionType::Tag),
            item("verginin", 1, SuggestionType::Content),
            item("vergi", 3, SuggestionType::Title),
            item("veri", 1, SuggestionType::Keyword),
        ];

        rank_suggestions(&mut items);

        let order: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(order, vec!["vergi", "veri", "vergisi", "verginin"]);
    }
}
