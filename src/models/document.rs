// file: src/models/document.rs
// description: document metadata and content records as held by the document store
// reference: internal data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[serde(alias = "aktif")]
    Active,
    #[serde(alias = "pasif")]
    Inactive,
}

/// Metadata fields the store can pattern-match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Description,
    Keywords,
    Tags,
}

impl MetadataField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Keywords => "keywords",
            Self::Tags => "tags",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(alias = "pdf_adi")]
    pub title: String,

    #[serde(alias = "kurum_id")]
    pub institution_id: String,

    #[serde(default, alias = "belge_turu")]
    pub document_type: String,

    /// Legal standing, e.g. "Yürürlükte"
    #[serde(default, alias = "belge_durumu")]
    pub legal_status: String,

    #[serde(default, alias = "belge_yayin_tarihi")]
    pub publication_date: String,

    /// Comma separated
    #[serde(default, alias = "etiketler")]
    pub tags: String,

    /// Comma separated
    #[serde(default, alias = "anahtar_kelimeler")]
    pub keywords: String,

    #[serde(default, alias = "aciklama")]
    pub description: String,

    #[serde(default)]
    pub url_slug: String,

    pub status: DocumentStatus,
}

impl Document {
    pub fn is_active(&self) -> bool {
        self.status == DocumentStatus::Active
    }

    pub fn field(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Title => &self.title,
            MetadataField::Description => &self.description,
            MetadataField::Keywords => &self.keywords,
            MetadataField::Tags => &self.tags,
        }
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.publication_date.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }
}

/// Full body text of a document, stored apart from its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(alias = "_id")]
    pub id: String,

    pub metadata_id: String,

    #[serde(alias = "icerik")]
    pub body: String,

    #[serde(default, alias = "olusturulma_tarihi")]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_with_turkish_field_names() {
        let doc: Document = serde_json::from_value(json!({
            "_id": "d1",
            "pdf_adi": "Vergi Tebliği",
            "kurum_id": "k1",
            "etiketler": "vergi, tebliğ",
            "belge_yayin_tarihi": "2024-03-01",
            "status": "aktif"
        }))
        .unwrap();

        assert_eq!(doc.title, "Vergi Tebliği");
        assert_eq!(doc.field(MetadataField::Tags), "vergi, tebliğ");
        assert!(doc.is_active());
        assert_eq!(doc.keywords, "");
    }

    #[test]
    fn test_unknown_status_fails_to_decode() {
        let result = serde_json::from_value::<Document>(json!({
            "id": "d1",
            "title": "x",
            "institution_id": "k1",
            "status": "archived"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_published_on_accepts_local_format() {
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "title": "x",
            "institution_id": "k1",
            "publication_date": "15.06.2023",
            "status": "inactive"
        }))
        .unwrap();

        assert_eq!(doc.published_on(), NaiveDate::from_ymd_opt(2023, 6, 15));
        assert!(!doc.is_active());
    }
}
