// file: src/models/search_result.rs
// description: Search result model with heuristic relevance scores
// reference: Used for metadata and content search results

use crate::models::{Document, Institution};
use crate::search::ranking::relevance_percentage;
use crate::utils::Validator;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_INSTITUTION: &str = "Bilinmeyen Kurum";

/// Field that produced a hit. Declaration order is the display order of
/// compound match types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchField {
    Title,
    Institution,
    Tags,
    Keywords,
    Description,
    Content,
    Phrase,
}

impl MatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Institution => "institution",
            Self::Tags => "tags",
            Self::Keywords => "keywords",
            Self::Description => "description",
            Self::Content => "content",
            Self::Phrase => "phrase",
        }
    }
}

impl FromStr for MatchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "institution" => Ok(Self::Institution),
            "tags" => Ok(Self::Tags),
            "keywords" => Ok(Self::Keywords),
            "description" => Ok(Self::Description),
            "content" => Ok(Self::Content),
            "phrase" => Ok(Self::Phrase),
            other => Err(format!("unknown match field: {other}")),
        }
    }
}

/// One or more match fields, rendered as e.g. `title+content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchType(Vec<MatchField>);

impl MatchType {
    pub fn single(field: MatchField) -> Self {
        Self(vec![field])
    }

    pub fn fields(&self) -> &[MatchField] {
        &self.0
    }

    pub fn contains(&self, field: MatchField) -> bool {
        self.0.contains(&field)
    }

    /// Union with `other`. Never drops a field already present.
    pub fn widen(&mut self, other: &MatchType) {
        for field in &other.0 {
            if !self.0.contains(field) {
                self.0.push(*field);
            }
        }
        self.0.sort();
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            f.write_str(field.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s
            .split('+')
            .map(MatchField::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        fields.sort();
        fields.dedup();
        Ok(Self(fields))
    }
}

impl Serialize for MatchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub institution_name: String,
    pub institution_logo: String,
    pub document_type: String,
    pub legal_status: String,
    pub publication_date: String,
    pub tags: String,
    pub description: String,
    pub url_slug: String,
    pub match_type: MatchType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,

    /// Unbounded heuristic score, higher is better
    pub relevance_score: f64,

    /// Display transform of `relevance_score`, 0-100
    pub relevance_percentage: u8,

    pub match_count: usize,
}

impl SearchResult {
    /// Build an unscored result with the document's display fields denormalized.
    pub fn for_document(
        doc: &Document,
        institution: Option<&Institution>,
        match_type: MatchType,
        description_max_chars: usize,
    ) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            institution_name: institution
                .map(|i| i.name.clone())
                .unwrap_or_else(|| UNKNOWN_INSTITUTION.to_string()),
            institution_logo: institution.map(|i| i.logo.clone()).unwrap_or_default(),
            document_type: doc.document_type.clone(),
            legal_status: doc.legal_status.clone(),
            publication_date: doc.publication_date.clone(),
            tags: doc.tags.clone(),
            description: Validator::truncate_text(&doc.description, description_max_chars),
            url_slug: doc.url_slug.clone(),
            match_type,
            content_preview: None,
            relevance_score: 0.0,
            relevance_percentage: 0,
            match_count: 0,
        }
    }

    /// Set the score and keep the percentage in step with it.
    pub fn set_relevance(&mut self, score: f64) {
        self.relevance_score = score;
        self.relevance_percentage = relevance_percentage(score);
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_preview_len: usize) -> String {
        let mut summary = format!(
            "Score: {:.2} ({}%) | {} [{}]\n{} | {} | matches: {}\n",
            self.relevance_score,
            self.relevance_percentage,
            self.title,
            self.match_type,
            self.institution_name,
            self.publication_date,
            self.match_count,
        );

        if let Some(preview) = &self.content_preview {
            summary.push_str(&Validator::truncate_text(preview, max_preview_len));
            summary.push('\n');
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentStatus;

    fn document() -> Document {
        Document {
            id: "d1".to_string(),
            title: "Vergi Tebliği".to_string(),
            institution_id: "k1".to_string(),
            document_type: "Tebliğ".to_string(),
            legal_status: "Yürürlükte".to_string(),
            publication_date: "2024-01-10".to_string(),
            tags: "vergi".to_string(),
            keywords: String::new(),
            description: "a".repeat(250),
            url_slug: "vergi-tebligi".to_string(),
            status: DocumentStatus::Active,
        }
    }

    #[test]
    fn test_match_type_widen_is_ordered_and_deduplicated() {
        let mut content = MatchType::single(MatchField::Content);
        content.widen(&MatchType::single(MatchField::Title));
        assert_eq!(content.to_string(), "title+content");

        let mut title = MatchType::single(MatchField::Title);
        title.widen(&MatchType::single(MatchField::Content));
        title.widen(&MatchType::single(MatchField::Content));
        assert_eq!(title, content);
    }

    #[test]
    fn test_match_type_serde() {
        let parsed: MatchType = serde_json::from_str("\"tags+content\"").unwrap();
        assert!(parsed.contains(MatchField::Tags));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"tags+content\"");
        assert!(serde_json::from_str::<MatchType>("\"bogus\"").is_err());
    }

    #[test]
    fn test_for_document_denormalizes_display_fields() {
        let institution = Institution::new("k1", "Gelir İdaresi Başkanlığı");
        let result = SearchResult::for_document(
            &document(),
            Some(&institution),
            MatchType::single(MatchField::Title),
            200,
        );

        assert_eq!(result.institution_name, "Gelir İdaresi Başkanlığı");
        assert_eq!(result.description.chars().count(), 203);
        assert!(result.description.ends_with("..."));
    }

    #[test]
    fn test_unknown_institution_fallback() {
        let result = SearchResult::for_document(
            &document(),
            None,
            MatchType::single(MatchField::Title),
            200,
        );
        assert_eq!(result.institution_name, UNKNOWN_INSTITUTION);
        assert_eq!(result.institution_logo, "");
    }

    #[test]
    fn test_set_relevance_updates_percentage() {
        let mut result = SearchResult::for_document(
            &document(),
            None,
            MatchType::single(MatchField::Title),
            200,
        );
        result.set_relevance(10.0);
        assert_eq!(result.relevance_percentage, 30);

        let summary = result.format_summary(50);
        assert!(summary.contains("10.00 (30%)"));
        assert!(summary.contains("[title]"));
    }
}
