use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toolflow_catalog::Tool;

use crate::error::FlowError;

/// Position of a tool in a user's workflow.
///
/// Declaration order matters: it is the tie-break order of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Getting data in (fetch, upload, pick)
    Collect,
    /// Reshaping it (convert, format, encode)
    Prepare,
    /// Producing something new (generate, create)
    Build,
    /// Checking the result (validate, test, diff)
    Verify,
    /// Protecting it (hash, encrypt, redact)
    Secure,
    /// Making it smaller or faster (minify, compress)
    Optimize,
    /// Handing it off (export, download, publish)
    Deliver,
}

/// Stage used when no keyword matches at all.
pub const DEFAULT_STAGE: Stage = Stage::Build;

impl Stage {
    /// All stages in declaration order.
    pub const ALL: [Stage; 7] = [
        Stage::Collect,
        Stage::Prepare,
        Stage::Build,
        Stage::Verify,
        Stage::Secure,
        Stage::Optimize,
        Stage::Deliver,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Collect => "collect",
            Stage::Prepare => "prepare",
            Stage::Build => "build",
            Stage::Verify => "verify",
            Stage::Secure => "secure",
            Stage::Optimize => "optimize",
            Stage::Deliver => "deliver",
        }
    }

    /// Lowercase substrings that signal this stage in a tool's text.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Stage::Collect => &[
                "import", "fetch", "upload", "scrape", "reader", "collect", "capture", "extract",
                "lookup", "picker",
            ],
            Stage::Prepare => &[
                "convert",
                "converter",
                "format",
                "parse",
                "clean",
                "normalize",
                "transform",
                "encode",
                "decode",
                "escape",
            ],
            Stage::Build => &[
                "generator",
                "generate",
                "builder",
                "maker",
                "create",
                "editor",
                "designer",
                "compose",
                "calculator",
            ],
            Stage::Verify => &[
                "validator",
                "validate",
                "checker",
                "check",
                "lint",
                "tester",
                "test",
                "compare",
                "diff",
                "verify",
            ],
            Stage::Secure => &[
                "encrypt", "decrypt", "hash", "cipher", "secure", "security", "privacy",
                "sanitize", "redact", "obfuscat",
            ],
            Stage::Optimize => &[
                "minify",
                "minifier",
                "compress",
                "optimize",
                "optimizer",
                "shrink",
                "reduce",
                "beautify",
                "resize",
            ],
            Stage::Deliver => &[
                "export", "download", "share", "publish", "embed", "print", "send", "deploy",
            ],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == lowered)
            .ok_or_else(|| FlowError::UnknownStage(value.to_string()))
    }
}

/// Per-stage keyword hit counts for `text`, in declaration order.
///
/// A keyword counts once if it occurs anywhere in the text, regardless of how
/// many times it appears.
#[must_use]
pub fn stage_scores(text: &str) -> [(Stage, usize); 7] {
    let lowered = text.to_lowercase();
    Stage::ALL.map(|stage| {
        let hits = stage
            .keywords()
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count();
        (stage, hits)
    })
}

/// Classify raw text. Ties go to the earliest stage; no hits means [`DEFAULT_STAGE`].
#[must_use]
pub fn stage_from_text(text: &str) -> Stage {
    let scores = stage_scores(text);
    let (mut best, mut best_score) = scores[0];
    for &(stage, score) in &scores[1..] {
        if score > best_score {
            best = stage;
            best_score = score;
        }
    }
    if best_score == 0 {
        DEFAULT_STAGE
    } else {
        best
    }
}

/// Classify a tool from its slug, name and description.
#[must_use]
pub fn stage_from_tool(tool: &Tool) -> Stage {
    let stage = stage_from_text(&tool.combined_text());
    log::debug!("tool {} classified as {stage}", tool.slug);
    stage
}
