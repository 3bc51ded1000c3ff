//! # Toolflow
//!
//! Workflow sequencing for a catalog of single-purpose tools: given the tool a
//! user is looking at, suggest what they would reach for right before and
//! right after it.
//!
//! ## Architecture
//!
//! ```text
//! Catalog (Tool[])
//!     │
//!     ├──> Tokenizer ── lowercase, strip punctuation, drop short tokens
//!     │
//!     ├──> Stage Classifier ── keyword substring hits per stage
//!     │      └─ collect → prepare → build → verify → secure → optimize → deliver
//!     │
//!     ├──> Flow Graph ── which stages may sit before / after each stage
//!     │
//!     └──> Ranker + Resolver
//!            ├─ +3 same category, +4 target stage, +1 per shared token
//!            ├─ drop zero scores, stable sort by score
//!            └─ top-N per direction
//! ```
//!
//! ## Example
//!
//! ```rust
//! use toolflow_catalog::Catalog;
//! use toolflow_flow::FlowEngine;
//!
//! let engine = FlowEngine::new(Catalog::builtin().unwrap());
//! let links = engine.get_tool_flow_links("password-generator", 3);
//! for tool in &links.after {
//!     println!("next: /{} {}", tool.slug, tool.name);
//! }
//! assert!(links.after.len() <= 3);
//! ```

mod config;
mod error;
mod flow_graph;
mod ranker;
mod resolver;
mod stage;
mod tokenizer;

pub use config::{FlowConfig, ScoreWeights, DEFAULT_LIMIT};
pub use error::{FlowError, Result};
pub use flow_graph::{stage_links, target_stages, FlowDirection, StageLinks, FLOW_GRAPH};
pub use ranker::{
    rank_flow_candidates, rank_flow_candidates_with, ScoreBreakdown, ScoredCandidate, ToolProfile,
};
pub use resolver::{get_tool_flow_links, FlowEngine, FlowLinks};
pub use stage::{stage_from_text, stage_from_tool, stage_scores, Stage, DEFAULT_STAGE};
pub use tokenizer::normalize_tokens;
