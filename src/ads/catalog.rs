use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::model::Ad;
use crate::schema::{validate_value, SchemaValidationError};

/// Frozen schema for catalog files (v0).
pub const CATALOG_SCHEMA_V0: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Ad Catalog v0",
  "type": "object",
  "required": ["ads"],
  "additionalProperties": false,
  "properties": {
    "ads": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["id", "text", "url", "category"],
        "additionalProperties": false,
        "properties": {
          "id": { "type": "string", "minLength": 1 },
          "text": { "type": "string", "minLength": 1 },
          "url": { "type": "string", "minLength": 1 },
          "category": { "type": "string", "minLength": 1 }
        }
      }
    }
  }
}"#;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog does not match schema: {0}")]
    Schema(#[from] SchemaValidationError),
    #[error("duplicate ad id in catalog: {0}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
struct CatalogFile {
    ads: Vec<Ad>,
}

/// The fixed, ordered set of ads the selector draws from.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdCatalog {
    ads: Vec<Ad>,
}

impl AdCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(ads: Vec<Ad>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(ads.len());
        for ad in &ads {
            if !seen.insert(ad.id.as_str()) {
                return Err(CatalogError::DuplicateId(ad.id.clone()));
            }
        }
        Ok(Self { ads })
    }

    /// The eight-ad catalog the service ships with.
    pub fn builtin() -> Self {
        let ads = [
            ("ad1", "Shop the latest fashion trends", "fashion"),
            ("ad2", "Best deals on electronics", "electronics"),
            ("ad3", "Home & Garden essentials", "home"),
            ("ad4", "Sports equipment sale", "sports"),
            ("ad5", "Books and education", "books"),
            ("ad6", "Health and wellness", "health"),
            ("ad7", "Travel deals", "travel"),
            ("ad8", "Food and beverages", "food"),
        ]
        .into_iter()
        .map(|(id, text, category)| {
            Ad::new(id, text, format!("https://example.com/{id}"), category)
        })
        .collect();

        Self { ads }
    }

    /// Load a catalog file, validating it against [`CATALOG_SCHEMA_V0`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(raw)?;
        let schema: Value = serde_json::from_str(CATALOG_SCHEMA_V0)?;
        validate_value(&schema, &value)?;

        let file: CatalogFile = serde_json::from_value(value)?;
        let ads = file
            .ads
            .into_iter()
            .map(|ad| Ad::new(ad.id, ad.text, ad.url, ad.category))
            .collect();
        Self::new(ads)
    }

    pub fn ads(&self) -> &[Ad] {
        &self.ads
    }

    pub fn len(&self) -> usize {
        self.ads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }

    pub fn contains(&self, ad: &Ad) -> bool {
        self.ads.iter().any(|a| a == ad)
    }
}
