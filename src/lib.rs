//! runbox: bounded execution of untrusted scripts
//!
//! Given inline source code or the name of a previously saved script,
//! runbox runs it in a child process under a hard wall-clock deadline,
//! captures stdout and stderr, and cleans up any call-scoped artifacts.
//!
//! # Architecture
//!
//! - [`engine`]: process spawning, deadline supervision, output capture,
//!   ephemeral artifact lifecycle
//! - [`store`]: name-keyed script persistence the engine resolves
//!   references through
//! - [`config`]: the interpreter table and timeout defaults
//! - [`types`]: request/result types and the error taxonomy
//! - [`cli`]: command-line adapter over engine and store
//!
//! # Guarantees
//!
//! 1. Hitting the deadline terminates and reaps the child before the call
//!    returns; the sentinel text replaces any partial output.
//! 2. On normal completion the combined output is stdout followed by
//!    stderr, never interleaved by arrival time.
//! 3. An inline execution's temporary file is gone when the call returns,
//!    whether it succeeded, failed, or timed out. Referenced scripts are
//!    never deleted.
//! 4. Script names are normalized at every boundary that accepts one.
//!
//! This is process-level containment only: there is no namespace or
//! resource-limit isolation, so callers must not treat the deadline as a
//! security boundary.

pub mod cli;
pub mod config;
pub mod engine;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use store::{FsScriptStore, ScriptName, ScriptStore};
pub use types::{
    EngineError, ExecutionRequest, ExecutionResult, Result, SourceKind, TIMEOUT_SENTINEL,
};
