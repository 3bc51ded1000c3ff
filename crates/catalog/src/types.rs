use serde::{Deserialize, Serialize};

/// A single entry of the tool catalog.
///
/// Owned by the catalog; the flow engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    /// URL-safe identifier, unique within a catalog (e.g. "json-formatter")
    pub slug: String,

    /// Display name
    pub name: String,

    /// One-line description shown under the name
    #[serde(default)]
    pub description: String,

    /// Category identifier (e.g. "data", "security")
    pub category: String,

    /// Icon identifier used by the page layer
    #[serde(default)]
    pub icon: String,
}

impl Tool {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            icon: icon.into(),
        }
    }

    /// Text used for classification and token overlap: slug, name and description.
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.slug, self.name, self.description)
    }

    /// Page path the UI links to.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/{}", self.slug)
    }
}
