use serde::{Deserialize, Serialize};

/// A single advertisement from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: String,
    pub text: String,
    pub url: String,
    pub category: String,
}

impl Ad {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            url: url.into(),
            category: category.into().to_lowercase(),
        }
    }

    /// Case-insensitive substring match of `key` against the category.
    ///
    /// `key` must already be lowercased.
    pub(crate) fn matches(&self, key: &str) -> bool {
        self.category.to_lowercase().contains(key)
    }
}

/// Arguments of the `ads.get` tool.
///
/// `contextKeys` may be absent, null, or empty; all three select the
/// random fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRequest {
    #[serde(rename = "contextKeys", default)]
    pub context_keys: Option<Vec<String>>,
}

impl AdRequest {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context_keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    /// The context keys, treating null the same as an empty list.
    pub fn keys(&self) -> &[String] {
        self.context_keys.as_deref().unwrap_or(&[])
    }
}

/// Result of the `ads.get` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdResponse {
    pub ads: Vec<Ad>,
}

impl From<Vec<Ad>> for AdResponse {
    fn from(ads: Vec<Ad>) -> Self {
        Self { ads }
    }
}
