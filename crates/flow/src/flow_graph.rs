use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::stage::Stage;

/// Which side of the current tool a suggestion sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Before,
    After,
}

impl FlowDirection {
    pub const BOTH: [FlowDirection; 2] = [FlowDirection::Before, FlowDirection::After];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlowDirection::Before => "before",
            FlowDirection::After => "after",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(FlowDirection::Before),
            "after" => Ok(FlowDirection::After),
            _ => Err(FlowError::UnknownDirection(value.to_string())),
        }
    }
}

/// Stages acceptable immediately before / after a given stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLinks {
    pub before: &'static [Stage],
    pub after: &'static [Stage],
}

impl StageLinks {
    #[must_use]
    pub const fn toward(&self, direction: FlowDirection) -> &'static [Stage] {
        match direction {
            FlowDirection::Before => self.before,
            FlowDirection::After => self.after,
        }
    }
}

/// Hand-authored stage adjacency, indexed by stage declaration order.
///
/// Row widths differ on purpose (prepare looks back one stage, secure three);
/// keep the table as written rather than deriving it from a window.
pub static FLOW_GRAPH: [StageLinks; 7] = [
    // collect
    StageLinks {
        before: &[],
        after: &[Stage::Prepare, Stage::Build, Stage::Verify],
    },
    // prepare
    StageLinks {
        before: &[Stage::Collect],
        after: &[Stage::Build, Stage::Verify, Stage::Secure],
    },
    // build
    StageLinks {
        before: &[Stage::Collect, Stage::Prepare],
        after: &[Stage::Verify, Stage::Secure, Stage::Optimize],
    },
    // verify
    StageLinks {
        before: &[Stage::Prepare, Stage::Build],
        after: &[Stage::Secure, Stage::Optimize, Stage::Deliver],
    },
    // secure
    StageLinks {
        before: &[Stage::Prepare, Stage::Build, Stage::Verify],
        after: &[Stage::Optimize, Stage::Deliver],
    },
    // optimize
    StageLinks {
        before: &[Stage::Verify, Stage::Secure],
        after: &[Stage::Deliver],
    },
    // deliver
    StageLinks {
        before: &[Stage::Verify, Stage::Secure, Stage::Optimize],
        after: &[],
    },
];

#[must_use]
pub fn stage_links(stage: Stage) -> &'static StageLinks {
    &FLOW_GRAPH[stage as usize]
}

/// Stages a candidate should belong to in order to sit `direction` of `stage`.
#[must_use]
pub fn target_stages(stage: Stage, direction: FlowDirection) -> &'static [Stage] {
    stage_links(stage).toward(direction)
}
