use crate::shared::Result;

/// Maximum length for ecosystem format tags (security limit)
const MAX_FORMAT_LENGTH: usize = 32;

/// Maximum length for group and artifact names (security limit)
const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for component versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Formats whose policy coordinates name a package with a single `packageId`
/// instead of a group/artifact pair.
const PACKAGE_ID_FORMATS: &[&str] = &["npm", "pypi", "gem", "nuget", "cargo", "conda", "cran"];

/// Component value object identifying a third-party dependency
///
/// A component is immutable once constructed. A remediated component is a
/// new value built from the policy engine's response, never the original
/// with its fields overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Component {
    format: String,
    group: String,
    artifact: String,
    version: String,
}

impl Component {
    /// Creates a validated component
    ///
    /// The format is stored lowercased, so `Maven` and `maven` name the same
    /// ecosystem.
    ///
    /// # Errors
    /// Returns an error if `format`, `artifact` or `version` is empty, if any
    /// field exceeds its length limit, or if any field contains control
    /// characters.
    pub fn new(
        format: impl Into<String>,
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let format: String = format.into();
        let format = format.to_lowercase();
        let group = group.into();
        let artifact = artifact.into();
        let version = version.into();

        validate_field("format", &format, MAX_FORMAT_LENGTH, true)?;
        validate_field("group", &group, MAX_NAME_LENGTH, false)?;
        validate_field("artifact", &artifact, MAX_NAME_LENGTH, true)?;
        validate_field("version", &version, MAX_VERSION_LENGTH, true)?;

        Ok(Self {
            format,
            group,
            artifact,
            version,
        })
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable name combining group and artifact
    ///
    /// npm scopes are joined with `/` (`@types/node`), Maven coordinates
    /// with `:` (`org.slf4j:slf4j-api`).
    pub fn display_name(&self) -> String {
        if self.group.is_empty() {
            self.artifact.clone()
        } else if self.group.starts_with('@') || self.format != "maven" {
            format!("{}/{}", self.group, self.artifact)
        } else {
            format!("{}:{}", self.group, self.artifact)
        }
    }

    /// Serializes the component to its package-URL identity
    ///
    /// The output is deterministic: `pkg:<format>/<group>/<artifact>@<version>`
    /// with the format lowercased, the group omitted when empty and every
    /// path segment percent-encoded.
    ///
    /// # Examples
    /// - `pkg:npm/left-pad@1.0.0`
    /// - `pkg:npm/%40types/node@20.10.0`
    /// - `pkg:maven/org.slf4j/slf4j-api@2.0.9`
    pub fn to_package_url(&self) -> String {
        let mut purl = format!("pkg:{}/", self.format);

        for segment in self.group.split('/').filter(|s| !s.is_empty()) {
            purl.push_str(&urlencoding::encode(segment));
            purl.push('/');
        }

        purl.push_str(&urlencoding::encode(&self.artifact));
        purl.push('@');
        purl.push_str(&urlencoding::encode(&self.version));
        purl
    }

    /// Parses a package-URL back into a component
    ///
    /// Qualifiers (`?...`) and subpaths (`#...`) are ignored. Everything
    /// between the type and the last `/` is treated as the namespace.
    pub fn from_package_url(purl: &str) -> Result<Self> {
        let Some(rest) = purl.strip_prefix("pkg:") else {
            anyhow::bail!("Package URL must start with 'pkg:': {}", purl);
        };

        let rest = rest.split(['#', '?']).next().unwrap_or_default();

        let Some((path, version)) = rest.rsplit_once('@') else {
            anyhow::bail!("Package URL has no version: {}", purl);
        };

        let Some((format, name_part)) = path.split_once('/') else {
            anyhow::bail!("Package URL has no name: {}", purl);
        };

        let (namespace, name) = match name_part.rsplit_once('/') {
            Some((namespace, name)) => (namespace, name),
            None => ("", name_part),
        };

        let group = namespace
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect::<Result<Vec<_>>>()?
            .join("/");

        Self::new(
            format,
            group,
            decode_segment(name)?,
            decode_segment(version)?,
        )
    }

    /// Converts the policy engine's structured identity into a component
    ///
    /// Formats that identify packages by a single `packageId` map it to the
    /// artifact, splitting an npm scope (`@scope/name`) into the group.
    ///
    /// # Errors
    /// Returns an error if the identity does not carry the coordinates needed
    /// for a valid component.
    pub fn from_policy_identity(identity: &PolicyIdentity) -> Result<Self> {
        let coordinates = &identity.coordinates;
        let format = identity.format.to_lowercase();

        let package_id = coordinates
            .package_id
            .as_deref()
            .filter(|id| !id.is_empty());

        let (group, artifact) = match (package_id, coordinates.artifact_id.as_deref()) {
            (Some(package_id), _) if PACKAGE_ID_FORMATS.contains(&format.as_str()) => {
                split_package_id(package_id)
            }
            (_, Some(artifact)) if !artifact.is_empty() => (
                coordinates.group_id.clone().unwrap_or_default(),
                artifact.to_string(),
            ),
            (Some(package_id), _) => split_package_id(package_id),
            _ => anyhow::bail!(
                "Policy identity for format '{}' has neither artifactId nor packageId",
                identity.format
            ),
        };

        Self::new(
            format,
            group,
            artifact,
            coordinates.version.clone().unwrap_or_default(),
        )
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_package_url())
    }
}

/// Structured component identity reported by the policy engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyIdentity {
    pub format: String,
    pub coordinates: PolicyCoordinates,
}

impl PolicyIdentity {
    pub fn new(format: impl Into<String>, coordinates: PolicyCoordinates) -> Self {
        Self {
            format: format.into(),
            coordinates,
        }
    }
}

/// Coordinates within a [`PolicyIdentity`]
///
/// Maven-like formats use `group_id`/`artifact_id`, package-id formats such
/// as npm use `package_id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyCoordinates {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub package_id: Option<String>,
    pub version: Option<String>,
}

fn split_package_id(package_id: &str) -> (String, String) {
    match package_id.split_once('/') {
        Some((scope, name)) if scope.starts_with('@') => (scope.to_string(), name.to_string()),
        _ => (String::new(), package_id.to_string()),
    }
}

fn decode_segment(segment: &str) -> Result<String> {
    Ok(urlencoding::decode(segment)
        .map_err(|e| anyhow::anyhow!("Invalid percent-encoding in '{}': {}", segment, e))?
        .into_owned())
}

fn validate_field(name: &str, value: &str, max_len: usize, required: bool) -> Result<()> {
    if required && value.is_empty() {
        anyhow::bail!("Component {} cannot be empty", name);
    }

    if value.len() > max_len {
        anyhow::bail!(
            "Component {} is too long ({} bytes). Maximum allowed: {} bytes",
            name,
            value.len(),
            max_len
        );
    }

    if value.chars().any(char::is_control) {
        anyhow::bail!("Component {} contains control characters", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npm(group: &str, artifact: &str, version: &str) -> Component {
        Component::new("npm", group, artifact, version).unwrap()
    }

    #[test]
    fn test_component_new_valid() {
        let component = npm("", "left-pad", "1.0.0");
        assert_eq!(component.format(), "npm");
        assert_eq!(component.group(), "");
        assert_eq!(component.artifact(), "left-pad");
        assert_eq!(component.version(), "1.0.0");
    }

    #[test]
    fn test_component_new_empty_artifact() {
        assert!(Component::new("npm", "", "", "1.0.0").is_err());
    }

    #[test]
    fn test_component_new_empty_version() {
        assert!(Component::new("npm", "", "left-pad", "").is_err());
    }

    #[test]
    fn test_component_new_empty_format() {
        assert!(Component::new("", "", "left-pad", "1.0.0").is_err());
    }

    #[test]
    fn test_component_new_version_too_long() {
        let result = Component::new("npm", "", "left-pad", "1".repeat(101));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_component_new_control_characters() {
        assert!(Component::new("npm", "", "left\npad", "1.0.0").is_err());
    }

    #[test]
    fn test_to_package_url_unscoped() {
        assert_eq!(
            npm("", "left-pad", "1.0.0").to_package_url(),
            "pkg:npm/left-pad@1.0.0"
        );
    }

    #[test]
    fn test_to_package_url_scoped_npm() {
        assert_eq!(
            npm("@types", "node", "20.10.0").to_package_url(),
            "pkg:npm/%40types/node@20.10.0"
        );
    }

    #[test]
    fn test_to_package_url_maven() {
        let component = Component::new("maven", "org.slf4j", "slf4j-api", "2.0.9").unwrap();
        assert_eq!(
            component.to_package_url(),
            "pkg:maven/org.slf4j/slf4j-api@2.0.9"
        );
    }

    #[test]
    fn test_to_package_url_lowercases_format() {
        let component = Component::new("NPM", "", "left-pad", "1.0.0").unwrap();
        assert_eq!(component.to_package_url(), "pkg:npm/left-pad@1.0.0");
    }

    #[test]
    fn test_to_package_url_is_stable() {
        let component = npm("@babel", "core", "7.23.0");
        assert_eq!(component.to_package_url(), component.to_package_url());
    }

    #[test]
    fn test_from_package_url_round_trip() {
        for component in [
            npm("", "left-pad", "1.0.0"),
            npm("@types", "node", "20.10.0"),
            Component::new("maven", "org.slf4j", "slf4j-api", "2.0.9").unwrap(),
        ] {
            let parsed = Component::from_package_url(&component.to_package_url()).unwrap();
            assert_eq!(parsed, component);
        }
    }

    #[test]
    fn test_from_package_url_ignores_qualifiers() {
        let component =
            Component::from_package_url("pkg:maven/org.slf4j/slf4j-api@2.0.9?type=jar").unwrap();
        assert_eq!(component.version(), "2.0.9");
        assert_eq!(component.group(), "org.slf4j");
    }

    #[test]
    fn test_from_package_url_invalid() {
        assert!(Component::from_package_url("npm/left-pad@1.0.0").is_err());
        assert!(Component::from_package_url("pkg:npm/left-pad").is_err());
        assert!(Component::from_package_url("pkg:npm@1.0.0").is_err());
    }

    #[test]
    fn test_from_policy_identity_npm_package_id() {
        let identity = PolicyIdentity::new(
            "npm",
            PolicyCoordinates {
                package_id: Some("left-pad".to_string()),
                version: Some("1.3.0".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            Component::from_policy_identity(&identity).unwrap(),
            npm("", "left-pad", "1.3.0")
        );
    }

    #[test]
    fn test_from_policy_identity_scoped_package_id() {
        let identity = PolicyIdentity::new(
            "npm",
            PolicyCoordinates {
                package_id: Some("@types/node".to_string()),
                version: Some("20.11.0".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            Component::from_policy_identity(&identity).unwrap(),
            npm("@types", "node", "20.11.0")
        );
    }

    #[test]
    fn test_from_policy_identity_maven_coordinates() {
        let identity = PolicyIdentity::new(
            "maven",
            PolicyCoordinates {
                group_id: Some("org.slf4j".to_string()),
                artifact_id: Some("slf4j-api".to_string()),
                version: Some("2.0.9".to_string()),
                ..Default::default()
            },
        );
        let component = Component::from_policy_identity(&identity).unwrap();
        assert_eq!(component.group(), "org.slf4j");
        assert_eq!(component.artifact(), "slf4j-api");
    }

    #[test]
    fn test_from_policy_identity_round_trip() {
        let original = Component::new("maven", "com.acme", "widget", "3.1.4").unwrap();
        let identity = PolicyIdentity::new(
            original.format(),
            PolicyCoordinates {
                group_id: Some(original.group().to_string()),
                artifact_id: Some(original.artifact().to_string()),
                version: Some(original.version().to_string()),
                package_id: None,
            },
        );
        assert_eq!(Component::from_policy_identity(&identity).unwrap(), original);
    }

    #[test]
    fn test_from_policy_identity_round_trip_mixed_case_format() {
        let original = Component::new("Maven", "com.acme", "widget", "3.1.4").unwrap();
        assert_eq!(original.format(), "maven");

        let identity = PolicyIdentity::new(
            "Maven",
            PolicyCoordinates {
                group_id: Some("com.acme".to_string()),
                artifact_id: Some("widget".to_string()),
                version: Some("3.1.4".to_string()),
                package_id: None,
            },
        );
        assert_eq!(Component::from_policy_identity(&identity).unwrap(), original);
        assert_eq!(
            Component::from_package_url(&original.to_package_url()).unwrap(),
            original
        );
    }

    #[test]
    fn test_same_package_url_means_equal_components() {
        let upper = Component::new("NPM", "", "left-pad", "1.0.0").unwrap();
        let lower = Component::new("npm", "", "left-pad", "1.0.0").unwrap();
        assert_eq!(upper.to_package_url(), lower.to_package_url());
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_from_policy_identity_without_coordinates() {
        let identity = PolicyIdentity::new("npm", PolicyCoordinates::default());
        assert!(Component::from_policy_identity(&identity).is_err());
    }

    #[test]
    fn test_from_policy_identity_without_version() {
        let identity = PolicyIdentity::new(
            "npm",
            PolicyCoordinates {
                package_id: Some("left-pad".to_string()),
                ..Default::default()
            },
        );
        assert!(Component::from_policy_identity(&identity).is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(npm("", "left-pad", "1.0.0").display_name(), "left-pad");
        assert_eq!(npm("@types", "node", "1.0.0").display_name(), "@types/node");
        let maven = Component::new("maven", "org.slf4j", "slf4j-api", "2.0.9").unwrap();
        assert_eq!(maven.display_name(), "org.slf4j:slf4j-api");
    }
}
