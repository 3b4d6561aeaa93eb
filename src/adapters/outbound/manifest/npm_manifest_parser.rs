use crate::ports::outbound::ManifestParser;
use crate::remediation::domain::{Component, ManifestComponents, ManifestReference, Position};
use crate::shared::Result;

const MANIFEST_FILENAME: &str = "package.json";

const DEPENDENCY_SECTIONS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Top-level package.json fields whose string values are not dependencies
const TOP_LEVEL_FIELDS: &[&str] = &[
    "name",
    "version",
    "description",
    "main",
    "module",
    "types",
    "typings",
    "license",
    "author",
    "homepage",
    "type",
    "private",
    "packageManager",
];

/// Object the parser is currently inside of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// A hunk started somewhere inside the file; the enclosing object is unknown
    Unknown,
    TopLevel,
    Dependencies,
    Other,
}

/// NpmManifestParser adapter for npm `package.json` diff patches
///
/// Scans the unified-diff patch of a changed `package.json` and extracts the
/// dependencies declared on added lines. The position of each component is
/// its 0-based line index within the patch.
pub struct NpmManifestParser;

impl NpmManifestParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NpmManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for NpmManifestParser {
    fn supports(&self, manifest: &ManifestReference) -> bool {
        manifest.basename() == MANIFEST_FILENAME
    }

    fn parse(&self, manifest: &ManifestReference) -> Result<ManifestComponents> {
        let mut components = ManifestComponents::new();
        let mut lines = manifest.patch.lines().enumerate().peekable();

        match lines.peek() {
            None => return Ok(components),
            Some((_, first)) if !first.starts_with("@@") => {
                anyhow::bail!(
                    "Patch of {} does not start with a hunk header",
                    manifest.filename
                );
            }
            Some(_) => {}
        }

        let mut base = Scope::Unknown;
        let mut stack: Vec<Scope> = Vec::new();

        for (index, line) in lines {
            if line.starts_with("@@") {
                base = Scope::Unknown;
                stack.clear();
                continue;
            }

            let (added, content) = match line.split_at_checked(1) {
                Some(("+", rest)) if !line.starts_with("+++") => (true, rest),
                Some((" ", rest)) => (false, rest),
                // removed lines and "\ No newline at end of file"
                _ => continue,
            };

            let trimmed = content.trim();

            if trimmed == "{" {
                base = Scope::TopLevel;
                stack.clear();
                continue;
            }

            if trimmed.starts_with('}') {
                if stack.pop().is_none() {
                    base = Scope::TopLevel;
                }
                continue;
            }

            if let Some(key) = opened_object(trimmed) {
                let scope = if DEPENDENCY_SECTIONS.contains(&key) {
                    Scope::Dependencies
                } else {
                    Scope::Other
                };
                stack.push(scope);
                continue;
            }

            if !added {
                continue;
            }

            let Some((name, value)) = parse_pair(trimmed) else {
                continue;
            };

            let scope = stack.last().copied().unwrap_or(base);
            let candidate = match scope {
                Scope::Dependencies => true,
                Scope::Unknown => !TOP_LEVEL_FIELDS.contains(&name),
                Scope::TopLevel | Scope::Other => false,
            };
            if !candidate {
                continue;
            }

            let Some(version) = normalize_version(value) else {
                tracing::debug!(name, value, "ignoring non-concrete npm version");
                continue;
            };

            match to_component(name, version) {
                Ok(component) => {
                    components.insert(Position::new(index as i64), component);
                }
                Err(e) => {
                    tracing::debug!(name, error = %e, "ignoring invalid npm dependency");
                }
            }
        }

        Ok(components)
    }
}

/// Returns the key of a `"key": {` line
fn opened_object(line: &str) -> Option<&str> {
    let rest = line.strip_suffix('{')?.trim_end();
    let rest = rest.strip_suffix(':')?.trim_end();
    rest.strip_prefix('"')?.strip_suffix('"')
}

/// Parses a `"name": "value"` line with an optional trailing comma
fn parse_pair(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('"')?;
    let (name, rest) = rest.split_once('"')?;
    let rest = rest.trim_start().strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let (value, rest) = rest.split_once('"')?;

    match rest.trim() {
        "" | "," => Some((name, value)),
        _ => None,
    }
}

/// Strips range prefixes and rejects anything that is not a concrete version
fn normalize_version(value: &str) -> Option<&str> {
    let value = value.trim();

    if value.contains(' ') || value.contains("||") || value.contains(':') || value.contains('/')
    {
        return None;
    }

    let version = value.trim_start_matches(['^', '~', '=', 'v']);
    if version.contains(['<', '>', '*']) {
        return None;
    }

    version
        .chars()
        .next()
        .filter(char::is_ascii_digit)
        .map(|_| version)
}

fn to_component(name: &str, version: &str) -> Result<Component> {
    match name.split_once('/') {
        Some((scope, artifact)) if scope.starts_with('@') => {
            Component::new("npm", scope, artifact, version)
        }
        Some(_) => anyhow::bail!("'{}' is not a valid npm package name", name),
        None => Component::new("npm", "", name, version),
    }
}
