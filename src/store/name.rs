/// Script name sanitization
///
/// A raw name crosses the engine/store boundary several times (save, run,
/// show), so normalization lives in one place and is applied whenever a
/// name enters the system. `ScriptName` can only be built through
/// [`ScriptName::parse`], so holding one means the name is already safe.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{EngineError, Result};

/// Extensions the store recognizes. A name without one of these gets a
/// `.py` suffix appended during normalization.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["py", "cpp", "java"];

/// A sanitized script name: basename only (no directory components), always
/// carrying a recognized extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptName(String);

impl ScriptName {
    /// Normalize and validate a raw name: strip everything up to the final
    /// path separator, then append `.py` if no recognized extension is
    /// present. Fails with `InvalidInput` when nothing is left.
    pub fn parse(raw: &str) -> Result<Self> {
        let base = basename(raw).trim();
        if base.is_empty() {
            return Err(EngineError::InvalidInput(
                "missing script name".to_string(),
            ));
        }
        Ok(Self(normalize(base)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension without the dot. Present by construction.
    pub fn extension(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when `name` ends in one of [`RECOGNIZED_EXTENSIONS`].
pub fn has_recognized_extension(name: &str) -> bool {
    RECOGNIZED_EXTENSIONS
        .iter()
        .any(|ext| name.len() > ext.len() + 1 && name.ends_with(&format!(".{ext}")))
}

fn basename(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or_default()
}

fn normalize(base: &str) -> String {
    if has_recognized_extension(base) {
        base.to_string()
    } else {
        format!("{base}.py")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_py_when_extension_missing() {
        assert_eq!(ScriptName::parse("hello").unwrap().as_str(), "hello.py");
        assert_eq!(ScriptName::parse("hello.txt").unwrap().as_str(), "hello.txt.py");
    }

    #[test]
    fn keeps_recognized_extensions() {
        assert_eq!(ScriptName::parse("a.py").unwrap().as_str(), "a.py");
        assert_eq!(ScriptName::parse("a.cpp").unwrap().as_str(), "a.cpp");
        assert_eq!(ScriptName::parse("a.java").unwrap().as_str(), "a.java");
    }

    #[test]
    fn strips_directory_traversal() {
        assert_eq!(
            ScriptName::parse("../../etc/passwd").unwrap().as_str(),
            "passwd.py"
        );
        assert_eq!(
            ScriptName::parse("/abs/path/run.py").unwrap().as_str(),
            "run.py"
        );
        assert_eq!(
            ScriptName::parse("..\\windows\\style.py").unwrap().as_str(),
            "style.py"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["hello", "a.cpp", "../../etc/passwd", "x.tar.gz"] {
            let once = ScriptName::parse(raw).unwrap();
            let twice = ScriptName::parse(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn rejects_empty_names() {
        assert!(ScriptName::parse("").is_err());
        assert!(ScriptName::parse("   ").is_err());
        assert!(ScriptName::parse("dir/").is_err());
    }

    #[test]
    fn extension_accessor() {
        assert_eq!(ScriptName::parse("a.cpp").unwrap().extension(), "cpp");
        assert_eq!(ScriptName::parse("a").unwrap().extension(), "py");
    }
}
