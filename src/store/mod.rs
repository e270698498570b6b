//! Script persistence.
//!
//! A name-to-content mapping the engine resolves references through. The
//! store is an explicit handle passed to whoever needs it; there is no
//! process-global script directory.

pub mod fs;
pub mod name;

pub use fs::FsScriptStore;
pub use name::ScriptName;

use crate::types::Result;
use std::path::PathBuf;

/// Store contract consumed by the engine and the CLI. Implementations must
/// tolerate concurrent reads of the same name.
pub trait ScriptStore: Send + Sync {
    /// Resolve a name to an on-disk path. Fails with `ReferenceNotFound`.
    fn resolve(&self, name: &ScriptName) -> Result<PathBuf>;

    /// Persist `content` under the name, overwriting any previous version.
    fn save(&self, name: &ScriptName, content: &str) -> Result<()>;

    /// Read a saved script back. Fails with `ReferenceNotFound`.
    fn read(&self, name: &ScriptName) -> Result<String>;

    /// Saved names, filtered to recognized extensions, sorted.
    fn list(&self) -> Result<Vec<ScriptName>>;
}
