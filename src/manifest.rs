//! Package metadata and manifest assembly
//!
//! The manifest is what the external packaging tool consumes: static package
//! metadata (loaded from TOML) plus one [`ExtensionDescriptor`] per native
//! module. This module only assembles and validates it; writing it out in any
//! wire format is the packaging tool's job.

use crate::descriptor::ExtensionDescriptor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

// Public version identifiers as accepted by Python packaging (PEP 440):
// epoch, release, pre, post and dev segments, optional local label.
static PACKAGE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^\s*v?
        (?:[0-9]+!)?
        [0-9]+(?:\.[0-9]+)*
        (?:[-_.]?(?:alpha|a|beta|b|preview|pre|c|rc)[-_.]?[0-9]*)?
        (?:-[0-9]+|[-_.]?(?:post|rev|r)[-_.]?[0-9]*)?
        (?:[-_.]?dev[-_.]?[0-9]*)?
        (?:\+[a-z0-9]+(?:[-_.][a-z0-9]+)*)?
        \s*$",
    )
    .expect("should build valid regex")
});

/// Errors that can occur while loading metadata or assembling a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse package metadata: {0}")]
    ParseError(String),

    #[error("Invalid package version {version:?}")]
    InvalidVersion { version: String },

    #[error("Extension module {0} is declared more than once")]
    DuplicateModule(String),
}

fn default_content_type() -> String {
    "text/markdown".to_string()
}

/// Static package metadata passed through to the packaging tool
///
/// Loaded from a TOML file such as:
///
/// ```toml
/// name = "my-package"
/// version = "0.1.0"
/// description = "Python bindings for my-package"
/// readme = "README.md"
/// classifiers = ["Programming Language :: C++"]
/// install_requires = ["setuptools", "libpy"]
///
/// [extras_require]
/// test = ["pytest"]
/// benchmark = ["pytest-benchmark"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageMetadata {
    pub name: String,

    /// Package version, passed through as written; must be a PEP 440 version
    pub version: String,

    #[serde(default)]
    pub description: String,

    /// Long description text; read from `readme` when not given inline
    #[serde(default)]
    pub long_description: Option<String>,

    /// README path, relative to the metadata file
    #[serde(default, skip_serializing)]
    pub readme: Option<PathBuf>,

    #[serde(default = "default_content_type")]
    pub long_description_content_type: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub author_email: String,

    /// Trove classifiers (e.g., "Programming Language :: C++")
    #[serde(default)]
    pub classifiers: Vec<String>,

    /// Runtime dependencies
    #[serde(default)]
    pub install_requires: Vec<String>,

    /// Optional dependency groups (e.g., `test`, `benchmark`)
    #[serde(default)]
    pub extras_require: BTreeMap<String, Vec<String>>,

    /// Python packages to ship; discovered from the project root when empty
    #[serde(default)]
    pub packages: Vec<String>,

    /// Whether the installed package may be imported from a zip archive.
    /// Off by default: the headers must exist as regular files.
    #[serde(default)]
    pub zip_safe: bool,
}

impl PackageMetadata {
    /// Parse metadata from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the version is invalid.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let metadata: Self =
            toml::from_str(content).map_err(|e| ManifestError::ParseError(e.to_string()))?;
        metadata.validate_version()?;
        Ok(metadata)
    }

    /// Load metadata from a TOML file, reading the README if one is named.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or the metadata is invalid.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = read_file(path)?;
        let mut metadata = Self::parse(&content)?;

        if metadata.long_description.is_none()
            && let Some(readme) = &metadata.readme
        {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            metadata.long_description = Some(read_file(&base.join(readme))?);
        }

        Ok(metadata)
    }

    /// Check that the version is a valid Python package version.
    ///
    /// The string itself is never normalized; `1.0`, `2024.1` and
    /// `0.1.0.dev1` are all kept exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidVersion`] naming the offending version.
    pub fn validate_version(&self) -> Result<(), ManifestError> {
        if PACKAGE_VERSION.is_match(&self.version) {
            Ok(())
        } else {
            Err(ManifestError::InvalidVersion {
                version: self.version.clone(),
            })
        }
    }
}

fn read_file(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|source| ManifestError::ReadError {
        path: path.display().to_string(),
        source,
    })
}

fn is_package_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir()
        && !name.starts_with('.')
        && !name.contains('.')
        && entry.path().join("__init__.py").is_file()
}

/// Discover Python packages under a project root.
///
/// A package is a directory containing `__init__.py`; discovery does not
/// descend into directories that are not packages. Returns sorted dotted names
/// (e.g., `["pkg", "pkg.sub"]`).
///
/// # Errors
///
/// Returns [`ManifestError::ReadError`] if the tree cannot be traversed.
pub fn discover_packages(project_root: &Path) -> Result<Vec<String>, ManifestError> {
    let mut packages = Vec::new();

    for entry in WalkDir::new(project_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || is_package_dir(e))
    {
        let entry = entry.map_err(|e| ManifestError::ReadError {
            path: project_root.display().to_string(),
            source: e.into(),
        })?;

        if entry.depth() == 0 {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(project_root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".");
        packages.push(name);
    }

    packages.sort();
    Ok(packages)
}

/// Package metadata plus the native modules it ships
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageManifest {
    pub metadata: PackageMetadata,
    pub ext_modules: Vec<ExtensionDescriptor>,
}

impl PackageManifest {
    /// Combine metadata with extension descriptors.
    ///
    /// Fills in `packages` by discovery when the metadata lists none.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is invalid, a module name appears twice,
    /// or package discovery fails.
    pub fn assemble(
        mut metadata: PackageMetadata,
        project_root: &Path,
        ext_modules: Vec<ExtensionDescriptor>,
    ) -> Result<Self, ManifestError> {
        metadata.validate_version()?;

        let mut seen = BTreeSet::new();
        for descriptor in &ext_modules {
            if !seen.insert(descriptor.module_name()) {
                return Err(ManifestError::DuplicateModule(
                    descriptor.module_name().to_string(),
                ));
            }
        }

        if metadata.packages.is_empty() {
            metadata.packages = discover_packages(project_root)?;
        }

        crate::debug!(
            "Assembled manifest for {} {}: {} package(s), {} extension module(s)",
            metadata.name,
            metadata.version,
            metadata.packages.len(),
            ext_modules.len()
        );

        Ok(Self {
            metadata,
            ext_modules,
        })
    }

    /// Look up an extension module by name
    pub fn extension(&self, module_name: &str) -> Option<&ExtensionDescriptor> {
        self.ext_modules
            .iter()
            .find(|d| d.module_name() == module_name)
    }
}
