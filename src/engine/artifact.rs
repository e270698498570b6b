/// Call-scoped source artifacts for inline execution
use crate::types::Result;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A temporary file holding inline code, owned by exactly one execution.
/// Deleted when dropped, on every exit path. Deletion failures are logged
/// and swallowed so cleanup never masks the primary result.
pub struct EphemeralArtifact {
    path: PathBuf,
}

impl EphemeralArtifact {
    /// Materialize `code` under `scratch_dir` with the given extension,
    /// using a uuid file name so concurrent executions cannot collide.
    pub fn create(scratch_dir: &Path, extension: &str, code: &str) -> Result<Self> {
        fs::create_dir_all(scratch_dir)?;
        let path = scratch_dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        fs::write(&path, code)?;
        log::debug!("materialized inline source at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EphemeralArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "failed to remove temp source {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> PathBuf {
        std::env::temp_dir().join(format!("runbox-artifact-{}", Uuid::new_v4()))
    }

    #[test]
    fn create_writes_and_drop_removes() {
        let dir = scratch();
        let path = {
            let artifact = EphemeralArtifact::create(&dir, "py", "print('hi')").unwrap();
            assert!(artifact.path().is_file());
            assert_eq!(artifact.path().extension().unwrap(), "py");
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn drop_tolerates_already_deleted_file() {
        let dir = scratch();
        let artifact = EphemeralArtifact::create(&dir, "py", "pass").unwrap();
        fs::remove_file(artifact.path()).unwrap();
        drop(artifact); // must not panic
        let _ = fs::remove_dir_all(&dir);
    }
}
