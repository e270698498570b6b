/// Filesystem-backed script store
use crate::store::name::{self, ScriptName};
use crate::store::ScriptStore;
use crate::types::{EngineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each script as one file under a single directory, keyed by its
/// normalized name. Reads of the same name may run concurrently; there is
/// no locking because creation and read of a given name are not expected
/// to race in normal use.
pub struct FsScriptStore {
    dir: PathBuf,
}

impl FsScriptStore {
    /// Open (and create if needed) the store directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            EngineError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create script directory {}: {}", dir.display(), e),
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &ScriptName) -> PathBuf {
        // `ScriptName` is basename-only by construction, so this join can
        // never escape the store directory.
        self.dir.join(name.as_str())
    }
}

impl ScriptStore for FsScriptStore {
    fn resolve(&self, name: &ScriptName) -> Result<PathBuf> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Err(EngineError::ReferenceNotFound(name.as_str().to_string()));
        }
        Ok(path)
    }

    fn save(&self, name: &ScriptName, content: &str) -> Result<()> {
        let path = self.path_of(name);
        fs::write(&path, content)?;
        log::debug!("saved script {}", path.display());
        Ok(())
    }

    fn read(&self, name: &ScriptName) -> Result<String> {
        let path = self.resolve(name)?;
        Ok(fs::read_to_string(path)?)
    }

    fn list(&self) -> Result<Vec<ScriptName>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if !name::has_recognized_extension(file_name) {
                continue;
            }
            // Saved names are already normalized, so parse is a no-op here.
            if let Ok(parsed) = ScriptName::parse(file_name) {
                names.push(parsed);
            }
        }
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> FsScriptStore {
        let dir = std::env::temp_dir().join(format!("runbox-store-{}", Uuid::new_v4()));
        FsScriptStore::new(dir).unwrap()
    }

    #[test]
    fn save_then_resolve_and_read() {
        let store = temp_store();
        let hi = ScriptName::parse("hi.py").unwrap();
        store.save(&hi, "print('hi')").unwrap();

        let path = store.resolve(&hi).unwrap();
        assert!(path.is_file());
        assert_eq!(store.read(&hi).unwrap(), "print('hi')");

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn missing_name_is_not_found() {
        let store = temp_store();
        let missing = ScriptName::parse("missing.py").unwrap();
        assert!(matches!(
            store.resolve(&missing),
            Err(EngineError::ReferenceNotFound(_))
        ));
        assert!(matches!(
            store.read(&missing),
            Err(EngineError::ReferenceNotFound(_))
        ));

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn list_filters_to_recognized_extensions() {
        let store = temp_store();
        store
            .save(&ScriptName::parse("b.py").unwrap(), "print()")
            .unwrap();
        store
            .save(&ScriptName::parse("a.cpp").unwrap(), "int main() {}")
            .unwrap();
        // A stray unrecognized file in the directory stays invisible.
        fs::write(store.dir().join("notes.txt"), "scratch").unwrap();

        let names: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|n| n.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["a.cpp".to_string(), "b.py".to_string()]);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn save_overwrites_previous_content() {
        let store = temp_store();
        let name = ScriptName::parse("v.py").unwrap();
        store.save(&name, "print(1)").unwrap();
        store.save(&name, "print(2)").unwrap();
        assert_eq!(store.read(&name).unwrap(), "print(2)");

        let _ = fs::remove_dir_all(store.dir());
    }
}
