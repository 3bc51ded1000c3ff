use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolflow_catalog::Tool;
use toolflow_flow::{FlowDirection, FlowEngine, ScoreBreakdown, ScoredCandidate, Stage};

pub const SCHEMA_VERSION: u32 = 1;

/// One suggestion as the page layer renders it: a link to `/<slug>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct FlowLink {
    pub href: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub stage: String,
}

impl FlowLink {
    #[must_use]
    pub fn from_tool(tool: &Tool, stage: Stage) -> Self {
        Self {
            href: tool.href(),
            slug: tool.slug.clone(),
            name: tool.name.clone(),
            description: tool.description.clone(),
            icon: tool.icon.clone(),
            stage: stage.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct FlowLinksResponse {
    pub schema_version: u32,
    pub slug: String,
    /// `None` when the slug is not in the catalog
    pub stage: Option<String>,
    pub limit: usize,
    pub before: Vec<FlowLink>,
    pub after: Vec<FlowLink>,
}

impl FlowLinksResponse {
    /// Resolve and render links for `slug`. Unknown slugs give empty lists.
    #[must_use]
    pub fn resolve(engine: &FlowEngine, slug: &str, limit: usize) -> Self {
        let links = engine.get_tool_flow_links(slug, limit);
        let render = |tools: &[&Tool]| -> Vec<FlowLink> {
            tools
                .iter()
                .map(|tool| {
                    let stage = engine
                        .stage_of(&tool.slug)
                        .unwrap_or(toolflow_flow::DEFAULT_STAGE);
                    FlowLink::from_tool(tool, stage)
                })
                .collect()
        };
        Self {
            schema_version: SCHEMA_VERSION,
            slug: slug.to_string(),
            stage: engine.stage_of(slug).map(|s| s.as_str().to_string()),
            limit,
            before: render(links.get(FlowDirection::Before)),
            after: render(links.get(FlowDirection::After)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct StageHits {
    pub stage: String,
    pub hits: usize,
}

/// Why a tool landed in its stage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct StageReport {
    pub slug: String,
    pub stage: String,
    pub scores: Vec<StageHits>,
    pub before_targets: Vec<String>,
    pub after_targets: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct ScoreParts {
    pub same_category: u32,
    pub target_stage: u32,
    pub token_overlap: u32,
}

impl From<ScoreBreakdown> for ScoreParts {
    fn from(value: ScoreBreakdown) -> Self {
        Self {
            same_category: value.same_category,
            target_stage: value.target_stage,
            token_overlap: value.token_overlap,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct RankedLink {
    pub link: FlowLink,
    pub score: u32,
    pub parts: ScoreParts,
}

impl From<&ScoredCandidate<'_>> for RankedLink {
    fn from(candidate: &ScoredCandidate<'_>) -> Self {
        Self {
            link: FlowLink::from_tool(candidate.tool, candidate.stage),
            score: candidate.score,
            parts: candidate.breakdown.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct RankResponse {
    pub slug: String,
    pub direction: String,
    pub candidates: Vec<RankedLink>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct StageCount {
    pub stage: String,
    pub tools: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct CatalogSummary {
    pub tools: usize,
    pub categories: Vec<String>,
    pub stages: Vec<StageCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// JSON Schema for [`FlowLinksResponse`], the shape the page layer consumes.
pub fn flow_links_schema() -> Result<String> {
    let schema = schemars::schema_for!(FlowLinksResponse);
    serialize_json_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use toolflow_catalog::Catalog;

    #[test]
    fn link_points_at_slug_path() {
        let tool = Tool::new("json-minifier", "JSON Minifier", "Minify JSON.", "data", "compress");
        let link = FlowLink::from_tool(&tool, Stage::Optimize);
        assert_eq!(link.href, "/json-minifier");
        assert_eq!(link.stage, "optimize");
        assert_eq!(link.icon, "compress");
    }

    #[test]
    fn response_for_unknown_slug_is_empty() {
        let engine = FlowEngine::new(Catalog::builtin().unwrap());
        let response = FlowLinksResponse::resolve(&engine, "does-not-exist", 3);
        assert_eq!(response.stage, None);
        assert!(response.before.is_empty());
        assert!(response.after.is_empty());
    }

    #[test]
    fn response_serializes_with_stage_names() {
        let engine = FlowEngine::new(Catalog::builtin().unwrap());
        let response = FlowLinksResponse::resolve(&engine, "password-generator", 2);
        let value: serde_json::Value =
            serde_json::from_str(&serialize_json(&response).unwrap()).unwrap();
        assert_eq!(value["stage"], "build");
        assert_eq!(value["after"][0]["href"], "/aes-encrypt");
        assert_eq!(value["after"][0]["stage"], "secure");
        assert_eq!(value["before"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn schema_names_response_fields() {
        let schema = flow_links_schema().unwrap();
        assert!(schema.contains("\"before\""));
        assert!(schema.contains("\"href\""));
    }
}
