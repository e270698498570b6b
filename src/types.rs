/// Core types and structures for the runbox engine
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::store::ScriptName;

/// Replacement text returned when an execution hits its deadline. Partial
/// output produced before the timeout is discarded, not merged in.
pub const TIMEOUT_SENTINEL: &str = "Execution timed out.";

/// Where the code to execute comes from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SourceKind {
    /// Code supplied directly in the request, run from a call-scoped
    /// temporary file.
    Inline(String),
    /// A previously saved script, resolved through the store and never
    /// deleted by the engine.
    Reference(ScriptName),
}

/// A single execution request. Build through [`ExecutionRequest::inline`] or
/// [`ExecutionRequest::reference`] so the non-emptiness invariants hold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub source: SourceKind,
    /// Bytes piped to the child's stdin.
    pub stdin: String,
    /// Hard wall-clock deadline for the child process.
    pub timeout: Duration,
}

impl ExecutionRequest {
    /// Request for inline code. Fails with `InvalidInput` when `code` is
    /// empty.
    pub fn inline(
        code: impl Into<String>,
        stdin: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let code = code.into();
        if code.is_empty() {
            return Err(EngineError::InvalidInput("no code provided".to_string()));
        }
        Ok(Self {
            source: SourceKind::Inline(code),
            stdin: stdin.into(),
            timeout,
        })
    }

    /// Request for a saved script. The raw name is normalized here; an
    /// empty name fails with `InvalidInput`.
    pub fn reference(name: &str, stdin: impl Into<String>, timeout: Duration) -> Result<Self> {
        let name = ScriptName::parse(name)?;
        Ok(Self {
            source: SourceKind::Reference(name),
            stdin: stdin.into(),
            timeout,
        })
    }
}

/// Outcome of one execution.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Captured stdout followed by captured stderr, no separator inserted.
    /// On timeout this is exactly [`TIMEOUT_SENTINEL`].
    pub combined_output: String,
    /// True when the wall-clock deadline was hit. A timeout is a terminal
    /// result state, not a failure.
    pub timed_out: bool,
    /// Exit code of the child, absent on timeout or signal death.
    pub exit_code: Option<i32>,
    /// Wall clock time spent in the child (milliseconds).
    pub wall_time_ms: u64,
}

/// Custom error types for runbox
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed or missing request fields (client error).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A reference did not resolve in the script store (client error).
    #[error("script not found: {0}")]
    ReferenceNotFound(String),

    /// The child process could not be started (operational error). Always
    /// propagated to the caller, never folded into an empty result.
    #[error("failed to launch interpreter: {0}")]
    Launch(#[source] std::io::Error),

    /// No interpreter is configured for the script's extension.
    #[error("no interpreter configured for extension '{extension}'")]
    NoInterpreter { extension: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for runbox operations
pub type Result<T> = std::result::Result<T, EngineError>;
