use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

/// Suggestions per direction when the caller does not pass a limit.
pub const DEFAULT_LIMIT: usize = 3;

/// Engine configuration.
///
/// The defaults reproduce the stock scoring; a TOML file may override any
/// field:
///
/// ```toml
/// default_limit = 5
///
/// [weights]
/// same_category = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    /// Maximum entries per list for [`crate::FlowEngine::links`]
    pub default_limit: usize,

    /// Score contributions used by the ranker
    pub weights: ScoreWeights,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            weights: ScoreWeights::default(),
        }
    }
}

/// Points a candidate earns for each signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    /// Candidate shares the current tool's category
    pub same_category: u32,

    /// Candidate's stage is one of the flow graph targets
    pub target_stage: u32,

    /// Per current-tool token also found in the candidate
    pub token_overlap: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            same_category: 3,
            target_stage: 4,
            token_overlap: 1,
        }
    }
}

impl FlowConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        log::debug!("loading flow config from {}", path.display());
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if w.same_category == 0 && w.target_stage == 0 && w.token_overlap == 0 {
            return Err(FlowError::InvalidConfig(
                "at least one score weight must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
