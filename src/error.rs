use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsrError {
    #[error("tarsnap binary unavailable: {bin}: {reason}")]
    ToolUnavailable { bin: PathBuf, reason: String },
    #[error("`{command}` failed ({status})\n{output}")]
    ToolFailed {
        command: String,
        status: ExitStatus,
        output: String,
    },
    #[error("unparseable archive line {line:?}: {reason}")]
    Unparseable { line: String, reason: String },
    #[error("prune incomplete: {failed} of {attempted} deletions failed")]
    PartialPrune { failed: usize, attempted: usize },
}

impl TsrError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolUnavailable { .. } => "tool_unavailable",
            Self::ToolFailed { .. } => "tool_failed",
            Self::Unparseable { .. } => "unparseable",
            Self::PartialPrune { .. } => "partial_prune",
        }
    }
}
