use crate::remediation::domain::{ManifestComponents, ManifestReference};
use crate::shared::Result;

/// ManifestParser port for extracting declared components from a manifest diff
///
/// Each implementation handles one manifest format (e.g. npm `package.json`).
pub trait ManifestParser: Send + Sync {
    /// Returns true if this parser understands the given manifest
    fn supports(&self, manifest: &ManifestReference) -> bool;

    /// Extracts the components declared by the manifest's patch
    ///
    /// # Returns
    /// Components keyed by their position within the patch
    ///
    /// # Errors
    /// Returns an error if the patch cannot be interpreted
    fn parse(&self, manifest: &ManifestReference) -> Result<ManifestComponents>;
}
