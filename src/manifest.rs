use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing `cnest.toml`.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read or write manifest file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Represents the contents of a `cnest.toml` file.
///
/// This includes project metadata and a map of installed dependencies with the
/// revision each one was installed at.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProjectManifest {
    /// Metadata about the project using `cnest`.
    pub project: Project,
    /// A map of package names to recorded revisions (e.g., `"widgets" => "v1.2"`).
    /// A key being present means the package was installed successfully at some
    /// point; no on-disk integrity check is performed afterwards.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Basic metadata for a `cnest` project. Free-form strings, set once at
/// project creation and never validated.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Project {
    pub name: String,
    pub version: String,
    pub author: String,
    pub license: String,
    pub description: String,
}

impl ProjectManifest {
    /// Creates a new `ProjectManifest` with the given metadata and no dependencies.
    pub fn new(name: &str, version: &str, author: &str, license: &str, description: &str) -> ProjectManifest {
        ProjectManifest {
            project: Project {
                name: String::from(name),
                version: String::from(version),
                author: String::from(author),
                license: String::from(license),
                description: String::from(description),
            },
            dependencies: BTreeMap::new(),
        }
    }

    /// An empty manifest, used when no manifest file exists yet.
    pub fn empty() -> ProjectManifest {
        ProjectManifest::new("", "", "", "", "")
    }

    /// Loads a `ProjectManifest` from a file path.
    ///
    /// A missing file is not an error: callers check for existence upstream,
    /// and an empty manifest is returned instead.
    ///
    /// # Errors
    /// Returns an error if an existing file can't be read or deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ProjectManifest, ManifestError> {
        if !path.as_ref().exists() {
            return Ok(ProjectManifest::empty());
        }
        let toml_str = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&toml_str)?)
    }

    /// Saves the `ProjectManifest` to the given file path in pretty TOML format,
    /// overwriting any existing file. The dependency map is a `BTreeMap`, so
    /// key order in the output is stable.
    ///
    /// # Errors
    /// Returns an error if the file can't be written or serialization fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Checks whether a package is already recorded as installed.
    pub fn is_installed(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }

    /// Returns the recorded revision for a package, if any.
    pub fn installed_revision(&self, package: &str) -> Option<&str> {
        self.dependencies.get(package).map(|s| s.as_str())
    }

    /// Records a package as installed at the given revision.
    pub fn record(&mut self, package: &str, revision: &str) {
        self.dependencies.insert(package.to_string(), revision.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_empty() {
        let dir = tempdir().unwrap();
        let manifest = ProjectManifest::load(dir.path().join("cnest.toml")).unwrap();
        assert!(manifest.project.name.is_empty());
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cnest.toml");
        let mut manifest = ProjectManifest::new("demo", "1.0.0", "Anonymous", "MIT", "A C++ project");
        manifest.record("widgets", "main-linux");
        manifest.save(&path).unwrap();

        let loaded = ProjectManifest::load(&path).unwrap();
        assert_eq!(loaded.project.name, "demo");
        assert_eq!(loaded.installed_revision("widgets"), Some("main-linux"));
    }

    #[test]
    fn test_save_stable_key_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cnest.toml");
        let mut manifest = ProjectManifest::new("demo", "1.0.0", "", "", "");
        manifest.record("zlib", "v1");
        manifest.record("abseil", "v2");
        manifest.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let abseil = content.find("abseil").unwrap();
        let zlib = content.find("zlib").unwrap();
        assert!(abseil < zlib);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cnest.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(ProjectManifest::load(&path), Err(ManifestError::Parse(_))));
    }
}
