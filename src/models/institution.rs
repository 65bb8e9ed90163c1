// file: src/models/institution.rs
// description: issuing institution as held by the institution cache

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(alias = "kurum_adi")]
    pub name: String,

    #[serde(default, alias = "kurum_logo")]
    pub logo: String,

    #[serde(default, alias = "aciklama", alias = "kurum_aciklama")]
    pub description: String,

    #[serde(default)]
    pub website: String,
}

impl Institution {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: String::new(),
            description: String::new(),
            website: String::new(),
        }
    }
}
