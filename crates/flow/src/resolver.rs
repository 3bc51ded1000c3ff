use toolflow_catalog::{Catalog, Tool};

use crate::config::FlowConfig;
use crate::error::Result;
use crate::flow_graph::{target_stages, FlowDirection};
use crate::ranker::{rank_flow_candidates, rank_profiled, ScoredCandidate, ToolProfile};
use crate::stage::Stage;

/// Suggested tools on each side of the current one, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowLinks<'a> {
    pub before: Vec<&'a Tool>,
    pub after: Vec<&'a Tool>,
}

impl<'a> FlowLinks<'a> {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    #[must_use]
    pub fn get(&self, direction: FlowDirection) -> &[&'a Tool] {
        match direction {
            FlowDirection::Before => &self.before,
            FlowDirection::After => &self.after,
        }
    }
}

/// Resolve flow links against a catalog without building a [`FlowEngine`].
///
/// An unknown slug yields empty lists.
#[must_use]
pub fn get_tool_flow_links<'a>(catalog: &'a Catalog, slug: &str, limit: usize) -> FlowLinks<'a> {
    let Some(tool) = catalog.get(slug) else {
        log::warn!("no tool with slug {slug:?}; returning no flow links");
        return FlowLinks::empty();
    };
    let take = |direction: FlowDirection| -> Vec<&'a Tool> {
        rank_flow_candidates(catalog, tool, direction)
            .into_iter()
            .take(limit)
            .map(|candidate| candidate.tool)
            .collect()
    };
    FlowLinks {
        before: take(FlowDirection::Before),
        after: take(FlowDirection::After),
    }
}

/// Flow engine over a fixed catalog.
///
/// Every tool's stage and tokens are computed once at construction; after that
/// the engine is read-only and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct FlowEngine {
    catalog: Catalog,
    profiles: Vec<ToolProfile>,
    config: FlowConfig,
}

impl FlowEngine {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::build(catalog, FlowConfig::default())
    }

    /// Engine with explicit settings; the config is validated first.
    pub fn with_config(catalog: Catalog, config: FlowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(catalog, config))
    }

    fn build(catalog: Catalog, config: FlowConfig) -> Self {
        let profiles = catalog.iter().map(ToolProfile::of).collect();
        Self {
            catalog,
            profiles,
            config,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    fn profile(&self, slug: &str) -> Option<(&Tool, &ToolProfile)> {
        let idx = self.catalog.position(slug)?;
        Some((self.catalog.tools().get(idx)?, self.profiles.get(idx)?))
    }

    #[must_use]
    pub fn stage_of(&self, slug: &str) -> Option<Stage> {
        self.profile(slug).map(|(_, profile)| profile.stage)
    }

    /// Stages the flow graph allows `direction` of the tool.
    #[must_use]
    pub fn target_stages(&self, slug: &str, direction: FlowDirection) -> Option<&'static [Stage]> {
        self.stage_of(slug)
            .map(|stage| target_stages(stage, direction))
    }

    /// Full ranked candidate list, without truncation. Empty for unknown slugs.
    #[must_use]
    pub fn rank(&self, slug: &str, direction: FlowDirection) -> Vec<ScoredCandidate<'_>> {
        let Some((tool, profile)) = self.profile(slug) else {
            return Vec::new();
        };
        rank_profiled(
            self.catalog.tools(),
            &self.profiles,
            tool,
            profile,
            direction,
            &self.config.weights,
        )
    }

    /// Top `limit` suggestions before and after the tool named by `slug`.
    ///
    /// An unknown slug is not an error: both lists come back empty.
    #[must_use]
    pub fn get_tool_flow_links(&self, slug: &str, limit: usize) -> FlowLinks<'_> {
        if !self.catalog.contains(slug) {
            log::warn!("no tool with slug {slug:?}; returning no flow links");
            return FlowLinks::empty();
        }
        let take = |direction: FlowDirection| {
            self.rank(slug, direction)
                .into_iter()
                .take(limit)
                .map(|candidate| candidate.tool)
                .collect::<Vec<_>>()
        };
        FlowLinks {
            before: take(FlowDirection::Before),
            after: take(FlowDirection::After),
        }
    }

    /// [`Self::get_tool_flow_links`] with the configured default limit.
    #[must_use]
    pub fn links(&self, slug: &str) -> FlowLinks<'_> {
        self.get_tool_flow_links(slug, self.config.default_limit)
    }

    /// Links for every tool, in catalog order.
    #[must_use]
    pub fn export_all(&self, limit: usize) -> Vec<(&Tool, FlowLinks<'_>)> {
        self.catalog
            .iter()
            .map(|tool| (tool, self.get_tool_flow_links(&tool.slug, limit)))
            .collect()
    }

    /// Number of catalog tools per stage, in declaration order.
    #[must_use]
    pub fn stage_histogram(&self) -> [(Stage, usize); 7] {
        Stage::ALL.map(|stage| {
            let count = self.profiles.iter().filter(|p| p.stage == stage).count();
            (stage, count)
        })
    }
}

impl Default for FlowEngine {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
