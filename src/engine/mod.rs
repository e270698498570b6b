//! Execution engine.
//!
//! One call is one strictly ordered cycle: resolve the source to a path,
//! spawn the interpreter, wait until exit or deadline, capture output,
//! clean up. The engine keeps no state between calls, so independent
//! requests may run concurrently; admission control, if any, belongs to
//! the caller.

mod artifact;
mod executor;

pub use artifact::EphemeralArtifact;

use crate::config::{EngineConfig, DEFAULT_TIMEOUT, INLINE_EXTENSION};
use crate::store::ScriptStore;
use crate::types::{EngineError, ExecutionRequest, ExecutionResult, Result, SourceKind};
use std::path::PathBuf;
use std::time::Duration;

/// Spawns and supervises a single code execution per call.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a previously saved script by name with the default deadline.
    pub fn run_by_reference(
        &self,
        store: &dyn ScriptStore,
        name: &str,
        stdin: &str,
    ) -> Result<ExecutionResult> {
        let request = ExecutionRequest::reference(name, stdin, DEFAULT_TIMEOUT)?;
        self.execute(store, &request)
    }

    /// Run inline code with an explicit deadline.
    pub fn run_inline(
        &self,
        store: &dyn ScriptStore,
        code: &str,
        stdin: &str,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        let request = ExecutionRequest::inline(code, stdin, timeout)?;
        self.execute(store, &request)
    }

    /// Execute one request. Inline code is materialized into a call-scoped
    /// artifact that is deleted on every exit path; referenced scripts are
    /// resolved through the store and outlive the call.
    pub fn execute(
        &self,
        store: &dyn ScriptStore,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult> {
        let (path, extension, _artifact): (PathBuf, &str, Option<EphemeralArtifact>) =
            match &request.source {
                SourceKind::Inline(code) => {
                    let artifact = EphemeralArtifact::create(
                        &self.config.scratch_dir,
                        INLINE_EXTENSION,
                        code,
                    )?;
                    (artifact.path().to_path_buf(), INLINE_EXTENSION, Some(artifact))
                }
                SourceKind::Reference(name) => (store.resolve(name)?, name.extension(), None),
            };

        let interpreter = self
            .config
            .interpreter_for(extension)
            .ok_or_else(|| EngineError::NoInterpreter {
                extension: extension.to_string(),
            })?
            .to_vec();

        log::info!(
            "executing {} (deadline {:?})",
            path.display(),
            request.timeout
        );
        executor::run_with_deadline(&interpreter, &path, &request.stdin, request.timeout)
        // `_artifact` drops here on success, failure, and timeout alike.
    }
}
