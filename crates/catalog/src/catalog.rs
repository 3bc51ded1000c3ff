use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::types::Tool;

const BUILTIN_CATALOG: &str = include_str!("../../../catalog/tools.json");

/// Ordered, read-only collection of tools with slug lookup.
///
/// Catalog order is significant: the ranker breaks score ties by it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Vec<Tool>,
    by_slug: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTomlCatalog {
    #[serde(default)]
    tools: Vec<Tool>,
}

impl Catalog {
    /// Build a catalog, validating every entry.
    pub fn new(tools: Vec<Tool>) -> Result<Self> {
        let mut by_slug = HashMap::with_capacity(tools.len());
        for (idx, tool) in tools.iter().enumerate() {
            validate_tool(tool)?;
            if by_slug.insert(tool.slug.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(tool.slug.clone()));
            }
        }
        log::debug!("catalog loaded with {} tools", tools.len());
        Ok(Self { tools, by_slug })
    }

    /// Catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse a JSON array of tools.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let tools: Vec<Tool> = serde_json::from_str(raw)?;
        Self::new(tools)
    }

    /// Parse a TOML document made of `[[tools]]` tables.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let parsed: RawTomlCatalog = toml::from_str(raw)?;
        Self::new(parsed.tools)
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let raw = match ext.as_deref() {
            Some("json") | Some("toml") => std::fs::read_to_string(path)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };
        log::debug!("reading catalog from {}", path.display());
        if ext.as_deref() == Some("toml") {
            Self::from_toml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Tool> {
        self.by_slug.get(slug).and_then(|&idx| self.tools.get(idx))
    }

    /// Position of a tool in catalog order.
    #[must_use]
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.by_slug.get(slug).copied()
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Tool;
    type IntoIter = std::slice::Iter<'a, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

/// Slugs become page paths, so only `[a-z0-9-]` is allowed and hyphens may not
/// lead or trail.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_tool(tool: &Tool) -> Result<()> {
    if !is_valid_slug(&tool.slug) {
        return Err(CatalogError::InvalidSlug(tool.slug.clone()));
    }
    if tool.name.trim().is_empty() {
        return Err(CatalogError::empty_field(&tool.slug, "name"));
    }
    if tool.category.trim().is_empty() {
        return Err(CatalogError::empty_field(&tool.slug, "category"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tool(slug: &str) -> Tool {
        Tool::new(slug, "Name", "", "misc", "")
    }

    #[test]
    fn keeps_insertion_order_and_indexes_slugs() {
        let catalog = Catalog::new(vec![tool("b"), tool("a"), tool("c")]).unwrap();
        let slugs: Vec<_> = catalog.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a", "c"]);
        assert_eq!(catalog.position("a"), Some(1));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = Catalog::new(vec![tool("dup"), tool("dup")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(slug) if slug == "dup"));
    }

    #[test]
    fn rejects_blank_name() {
        let mut bad = tool("x");
        bad.name = "  ".to_string();
        let err = Catalog::new(vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { field: "name", .. }));
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("json-formatter"));
        assert!(is_valid_slug("sha256"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-lead"));
        assert!(!is_valid_slug("trail-"));
        assert!(!is_valid_slug("Upper"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("a/b"));
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.len() >= 20);
        assert!(catalog.contains("password-generator"));
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
