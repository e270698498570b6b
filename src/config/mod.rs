//! Engine configuration
//!
//! Interpreter dispatch is an explicit table rather than an implicit rule:
//! the store accepts `.py`, `.cpp` and `.java` names, but only extensions
//! with a configured interpreter can actually run. The default table maps
//! `.py` to `python3` and nothing else, so running a stored `.cpp` script
//! is a visible `NoInterpreter` error until an entry is added.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock deadline for saved-script runs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Deadline for the legacy direct-run path.
pub const LEGACY_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Extension given to materialized inline code. Inline execution always
/// goes through the `py` interpreter entry.
pub const INLINE_EXTENSION: &str = "py";

/// Engine configuration, injected at construction. The engine holds no
/// other state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Interpreter table: extension (without the dot) to argv prefix. The
    /// resolved script path is appended as the final argument.
    pub interpreters: HashMap<String, Vec<String>>,
    /// Directory where inline-code artifacts are materialized.
    pub scratch_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut interpreters = HashMap::new();
        interpreters.insert("py".to_string(), vec!["python3".to_string()]);
        Self {
            interpreters,
            scratch_dir: std::env::temp_dir().join("runbox"),
        }
    }
}

impl EngineConfig {
    /// Look up the interpreter argv prefix for an extension.
    pub fn interpreter_for(&self, extension: &str) -> Option<&[String]> {
        self.interpreters.get(extension).map(Vec::as_slice)
    }

    /// Register or replace an interpreter entry.
    pub fn set_interpreter(&mut self, extension: impl Into<String>, argv: Vec<String>) {
        self.interpreters.insert(extension.into(), argv);
    }
}
