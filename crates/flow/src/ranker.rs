use std::collections::HashSet;

use serde::Serialize;
use toolflow_catalog::{Catalog, Tool};

use crate::config::ScoreWeights;
use crate::flow_graph::{target_stages, FlowDirection};
use crate::stage::{stage_from_tool, Stage};
use crate::tokenizer::normalize_tokens;

/// Derived, per-tool data the ranker needs: stage plus tokens.
#[derive(Debug, Clone)]
pub struct ToolProfile {
    pub stage: Stage,
    /// Tokens in text order, duplicates kept
    pub tokens: Vec<String>,
    token_set: HashSet<String>,
}

impl ToolProfile {
    #[must_use]
    pub fn of(tool: &Tool) -> Self {
        let tokens = normalize_tokens(&tool.combined_text());
        let token_set = tokens.iter().cloned().collect();
        Self {
            stage: stage_from_tool(tool),
            tokens,
            token_set,
        }
    }

    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }

    /// Number of `self.tokens` (repeats included) found anywhere in `other`.
    #[must_use]
    pub fn overlap_with(&self, other: &ToolProfile) -> u32 {
        let hits = self
            .tokens
            .iter()
            .filter(|token| other.contains_token(token))
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }
}

/// Points a candidate earned, per signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub same_category: u32,
    pub target_stage: u32,
    pub token_overlap: u32,
}

impl ScoreBreakdown {
    /// Sum of all parts, saturating at `u32::MAX`.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.same_category
            .saturating_add(self.target_stage)
            .saturating_add(self.token_overlap)
    }
}

/// A catalog tool scored against the current tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub tool: &'a Tool,
    pub stage: Stage,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

/// Rank every other tool of `catalog` as a `direction` step of `current`.
///
/// Candidates scoring zero are dropped. The result is sorted by score,
/// highest first; equal scores keep catalog order.
#[must_use]
pub fn rank_flow_candidates<'a>(
    catalog: &'a Catalog,
    current: &Tool,
    direction: FlowDirection,
) -> Vec<ScoredCandidate<'a>> {
    rank_flow_candidates_with(catalog, current, direction, &ScoreWeights::default())
}

/// [`rank_flow_candidates`] with explicit weights.
#[must_use]
pub fn rank_flow_candidates_with<'a>(
    catalog: &'a Catalog,
    current: &Tool,
    direction: FlowDirection,
    weights: &ScoreWeights,
) -> Vec<ScoredCandidate<'a>> {
    let profiles: Vec<ToolProfile> = catalog.iter().map(ToolProfile::of).collect();
    rank_profiled(
        catalog.tools(),
        &profiles,
        current,
        &ToolProfile::of(current),
        direction,
        weights,
    )
}

/// Core scoring loop over precomputed profiles (`profiles[i]` describes `tools[i]`).
pub(crate) fn rank_profiled<'a>(
    tools: &'a [Tool],
    profiles: &[ToolProfile],
    current: &Tool,
    current_profile: &ToolProfile,
    direction: FlowDirection,
    weights: &ScoreWeights,
) -> Vec<ScoredCandidate<'a>> {
    let targets = target_stages(current_profile.stage, direction);

    let mut ranked: Vec<ScoredCandidate<'a>> = tools
        .iter()
        .zip(profiles)
        .filter(|(candidate, _)| candidate.slug != current.slug)
        .filter_map(|(candidate, profile)| {
            let breakdown = ScoreBreakdown {
                same_category: if candidate.category == current.category {
                    weights.same_category
                } else {
                    0
                },
                target_stage: if targets.contains(&profile.stage) {
                    weights.target_stage
                } else {
                    0
                },
                token_overlap: current_profile
                    .overlap_with(profile)
                    .saturating_mul(weights.token_overlap),
            };
            let score = breakdown.total();
            (score > 0).then_some(ScoredCandidate {
                tool: candidate,
                stage: profile.stage,
                score,
                breakdown,
            })
        })
        .collect();

    // stable: equal scores keep catalog order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    log::debug!(
        "{} {direction}: {} candidates for {:?} targets",
        current.slug,
        ranked.len(),
        targets
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tool(slug: &str, name: &str, description: &str, category: &str) -> Tool {
        Tool::new(slug, name, description, category, "")
    }

    fn slugs(ranked: &[ScoredCandidate<'_>]) -> Vec<String> {
        ranked.iter().map(|c| c.tool.slug.clone()).collect()
    }

    #[test]
    fn scores_category_stage_and_overlap() {
        let current = tool("csv-to-json", "CSV to JSON Converter", "Convert CSV rows.", "data");
        let catalog = Catalog::new(vec![
            current.clone(),
            // verify stage (an "after" target of prepare), same category, shares "json"
            tool("json-validator", "JSON Validator", "", "data"),
            // collect stage (a "before" target of prepare), other category, shares "csv"
            tool("csv-reader", "CSV Reader", "", "files"),
            // default build stage, nothing shared
            tool("lorem-ipsum", "Lorem Ipsum", "", "text"),
        ])
        .unwrap();

        let after = rank_flow_candidates(&catalog, &current, FlowDirection::After);
        assert_eq!(
            slugs(&after),
            vec!["json-validator", "lorem-ipsum", "csv-reader"]
        );
        assert_eq!(
            after[0].breakdown,
            ScoreBreakdown {
                same_category: 3,
                target_stage: 4,
                token_overlap: 1,
            }
        );
        assert_eq!(after[0].score, 8);
        assert_eq!(after[1].breakdown.target_stage, 4);
        assert_eq!(after[1].score, 4);
        // "csv" appears twice in the current tool, so it counts twice
        assert_eq!(after[2].breakdown.token_overlap, 2);

        let before = rank_flow_candidates(&catalog, &current, FlowDirection::Before);
        assert_eq!(slugs(&before), vec!["csv-reader", "json-validator"]);
        assert_eq!(before[0].score, 4 + 2);
        assert_eq!(before[1].score, 3 + 1);
    }

    #[test]
    fn repeated_current_tokens_count_separately() {
        let current = tool("echo", "Echo Echo Echo", "", "a");
        let candidate = tool("other", "Echo", "", "b");
        let overlap = ToolProfile::of(&current).overlap_with(&ToolProfile::of(&candidate));
        // slug + three name tokens
        assert_eq!(overlap, 4);
        // the reverse direction only sees the candidate's single token
        let reverse = ToolProfile::of(&candidate).overlap_with(&ToolProfile::of(&current));
        assert_eq!(reverse, 1);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let current = tool("zzz-current", "Zzz", "", "same");
        let catalog = Catalog::new(vec![
            tool("bbb", "Bbb", "", "same"),
            current.clone(),
            tool("aaa", "Aaa", "", "same"),
            tool("ccc", "Ccc", "", "same"),
        ])
        .unwrap();
        let ranked = rank_flow_candidates(&catalog, &current, FlowDirection::After);
        assert_eq!(slugs(&ranked), vec!["bbb", "aaa", "ccc"]);
        assert!(ranked.iter().all(|c| c.score == 3));
    }

    #[test]
    fn zero_scores_are_dropped_and_self_is_excluded() {
        let current = tool("url-fetcher", "URL Fetcher", "Fetch a page.", "web");
        let catalog = Catalog::new(vec![
            current.clone(),
            tool("lorem-ipsum", "Lorem Ipsum", "", "text"),
        ])
        .unwrap();
        // collect has no predecessors, and nothing else matches
        assert!(rank_flow_candidates(&catalog, &current, FlowDirection::Before).is_empty());
    }

    #[test]
    fn custom_weights_change_scores() {
        let current = tool("aaa", "Aaa", "", "same");
        let catalog = Catalog::new(vec![current.clone(), tool("bbb", "Bbb", "", "same")]).unwrap();
        let weights = ScoreWeights {
            same_category: 10,
            ..ScoreWeights::default()
        };
        let ranked = rank_flow_candidates_with(&catalog, &current, FlowDirection::Before, &weights);
        assert_eq!(ranked[0].score, 10);
    }

    #[test]
    fn huge_weights_saturate_instead_of_overflowing() {
        let current = tool("json-tool", "Json Json", "", "data");
        let catalog = Catalog::new(vec![
            current.clone(),
            tool("json-viewer", "Json Viewer", "", "data"),
            tool("yaml-viewer", "Yaml Viewer", "", "data"),
        ])
        .unwrap();
        let weights = ScoreWeights {
            same_category: 3,
            target_stage: u32::MAX,
            token_overlap: 4_000_000_000,
        };
        // "json" appears twice in the current tool: 2 * 4e9 does not fit in u32
        let ranked = rank_flow_candidates_with(&catalog, &current, FlowDirection::After, &weights);
        assert_eq!(slugs(&ranked), vec!["json-viewer", "yaml-viewer"]);
        assert_eq!(ranked[0].breakdown.token_overlap, u32::MAX);
        assert_eq!(ranked[0].score, u32::MAX);
        assert_eq!(ranked[1].score, 3);
    }

    #[test]
    fn breakdown_total_saturates() {
        let parts = ScoreBreakdown {
            same_category: u32::MAX,
            target_stage: 4,
            token_overlap: 1,
        };
        assert_eq!(parts.total(), u32::MAX);
    }
}
