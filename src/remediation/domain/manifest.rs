use super::Component;
use std::collections::BTreeMap;

/// A changed file in a pull request, identified by its name and diff patch
///
/// The pipeline treats it as an opaque grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestReference {
    pub filename: String,
    pub patch: String,
}

impl ManifestReference {
    pub fn new(filename: impl Into<String>, patch: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.into(),
        }
    }

    /// Final path segment of the filename (`web/package.json` -> `package.json`)
    pub fn basename(&self) -> &str {
        self.filename
            .rsplit('/')
            .next()
            .unwrap_or(self.filename.as_str())
    }
}

/// Locator of a component declaration within a manifest's diff
///
/// Unique per manifest, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(i64);

impl Position {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Position {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Components declared by one manifest, keyed by position
pub type ManifestComponents = BTreeMap<Position, Component>;

/// Every changed manifest with the components it declares
pub type ManifestSet = BTreeMap<ManifestReference, ManifestComponents>;
