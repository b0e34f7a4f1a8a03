//! Extension descriptor assembly
//!
//! Merges the active [`BuildProfile`], platform compiler arguments, include
//! directories and discovered header dependencies into one immutable
//! [`ExtensionDescriptor`] per native module.
//!
//! Construction is atomic: either every check passes and a complete descriptor
//! is returned, or an error is returned and nothing else.

use crate::config::BuildConfig;
use crate::discovery::{FsHeaderDiscovery, HeaderDiscovery};
use crate::error::{ResolveError, Result};
use crate::platform::platform_compile_args;
use crate::profile::BuildProfile;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("should build valid regex")
});

/// Extension options set by the builder itself; callers may not pass them
pub const RESERVED_OPTIONS: &[&str] = &[
    "name",
    "sources",
    "optlevel",
    "debug_symbols",
    "werror",
    "max_errors",
    "include_dirs",
    "extra_compile_args",
    "depends",
];

/// Caller input for one native module
///
/// # Example
///
/// ```
/// use extplan::ExtensionSpec;
///
/// let spec = ExtensionSpec::new("pkg.module", ["pkg/module.cc"])
///     .include_dir("third_party/include")
///     .option("language", "c++");
/// assert_eq!(spec.source_files.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtensionSpec {
    /// Dotted module name (e.g., "pkg.module")
    pub module_name: String,

    /// Source files in compilation order
    pub source_files: Vec<PathBuf>,

    /// Additional include directories, searched after the project root
    pub include_dirs: Vec<PathBuf>,

    /// Pass-through extension options (e.g., `language`, `libraries`)
    pub options: BTreeMap<String, Value>,
}

impl ExtensionSpec {
    /// Create a spec for a module and its sources
    pub fn new<I, P>(module_name: impl Into<String>, source_files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            module_name: module_name.into(),
            source_files: source_files.into_iter().map(Into::into).collect(),
            include_dirs: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Add a caller-supplied include directory
    #[must_use]
    pub fn include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Add a pass-through extension option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Complete, immutable specification of how to compile one native module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionDescriptor {
    module_name: String,
    source_files: Vec<PathBuf>,
    profile: BuildProfile,
    include_dirs: Vec<PathBuf>,
    compile_args: Vec<String>,
    strict_warnings: bool,
    dependency_files: BTreeSet<PathBuf>,
    options: BTreeMap<String, Value>,
}

impl ExtensionDescriptor {
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    pub const fn profile(&self) -> BuildProfile {
        self.profile
    }

    pub const fn optimization_level(&self) -> u8 {
        self.profile.optimization_level()
    }

    pub const fn debug_symbols(&self) -> bool {
        self.profile.debug_symbols()
    }

    /// Diagnostic cap, taken unchanged from the profile
    pub const fn max_diagnostics(&self) -> Option<u32> {
        self.profile.max_diagnostics()
    }

    /// Include directories, project root first
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Base arguments followed by platform-conditional arguments
    pub fn compile_args(&self) -> &[String] {
        &self.compile_args
    }

    /// Whether any compiler warning fails the build
    pub const fn strict_warnings(&self) -> bool {
        self.strict_warnings
    }

    /// Header files whose modification invalidates a previous build
    pub const fn dependency_files(&self) -> &BTreeSet<PathBuf> {
        &self.dependency_files
    }

    pub const fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }
}

/// Assembles [`ExtensionDescriptor`]s for one build invocation
///
/// Holds everything that is shared between the modules of a package: the
/// project root, host platform, active profile and warning policy.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder<D = FsHeaderDiscovery> {
    project_root: PathBuf,
    platform_id: String,
    profile: BuildProfile,
    base_args: Vec<String>,
    strict_warnings: bool,
    discovery: D,
}

impl DescriptorBuilder {
    /// Create a builder using filesystem header discovery.
    ///
    /// Defaults: no base compiler arguments, warnings are errors.
    pub fn new(
        project_root: impl Into<PathBuf>,
        platform_id: impl Into<String>,
        profile: BuildProfile,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            platform_id: platform_id.into(),
            profile,
            base_args: Vec::new(),
            strict_warnings: true,
            discovery: FsHeaderDiscovery::default(),
        }
    }
}

impl<D: HeaderDiscovery> DescriptorBuilder<D> {
    /// Replace the header discovery capability
    pub fn with_discovery<E: HeaderDiscovery>(self, discovery: E) -> DescriptorBuilder<E> {
        DescriptorBuilder {
            project_root: self.project_root,
            platform_id: self.platform_id,
            profile: self.profile,
            base_args: self.base_args,
            strict_warnings: self.strict_warnings,
            discovery,
        }
    }

    /// Set the compiler arguments placed before any platform arguments
    #[must_use]
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Override the warnings-as-errors policy
    #[must_use]
    pub fn with_strict_warnings(mut self, strict: bool) -> Self {
        self.strict_warnings = strict;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    pub const fn profile(&self) -> BuildProfile {
        self.profile
    }

    /// Build the descriptor for one module.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidModuleNameError`] if the name is not a dotted identifier
    /// - [`ResolveError::NoSourcesError`] if there are no source files
    /// - [`ResolveError::ReservedOption`] if an option collides with a builder-managed one
    /// - [`ResolveError::DependencyDiscoveryError`] from header discovery, unchanged
    pub fn build(&self, spec: ExtensionSpec) -> Result<ExtensionDescriptor> {
        validate_spec(&spec)?;
        let dependency_files = self.discovery.discover(&self.project_root)?;
        Ok(self.assemble(spec, dependency_files))
    }

    /// Build descriptors for several modules.
    ///
    /// Every spec is validated before the project tree is walked, and the tree
    /// is walked once for the whole batch. Modules are independent, so they
    /// are assembled in parallel. Results keep the input order.
    ///
    /// # Errors
    ///
    /// Returns an error if any module fails; no descriptors are returned then.
    pub fn build_many(&self, specs: Vec<ExtensionSpec>) -> Result<Vec<ExtensionDescriptor>> {
        if specs.is_empty() {
            return Ok(Vec::new());
        }

        specs.par_iter().try_for_each(validate_spec)?;
        let dependency_files = self.discovery.discover(&self.project_root)?;

        Ok(specs
            .into_par_iter()
            .map(|spec| self.assemble(spec, dependency_files.clone()))
            .collect())
    }

    fn assemble(
        &self,
        spec: ExtensionSpec,
        dependency_files: BTreeSet<PathBuf>,
    ) -> ExtensionDescriptor {
        let ExtensionSpec {
            module_name,
            source_files,
            include_dirs,
            options,
        } = spec;

        let include_dirs = merge_include_dirs(&self.project_root, include_dirs);

        let mut compile_args = self.base_args.clone();
        compile_args.extend(platform_compile_args(&self.platform_id));

        crate::debug!(
            "Assembled {module_name}: {} source(s), {} include dir(s), args {compile_args:?}, {} header(s), {} profile",
            source_files.len(),
            include_dirs.len(),
            dependency_files.len(),
            self.profile
        );

        ExtensionDescriptor {
            module_name,
            source_files,
            profile: self.profile,
            include_dirs,
            compile_args,
            strict_warnings: self.strict_warnings,
            dependency_files,
            options,
        }
    }
}

/// Build one descriptor from an explicit build configuration.
///
/// Resolves the profile from the configuration first; a malformed debug flag
/// fails here before anything else is checked.
///
/// # Errors
///
/// Propagates profile resolution errors and everything
/// [`DescriptorBuilder::build`] can return.
pub fn build_descriptor(config: &BuildConfig, spec: ExtensionSpec) -> Result<ExtensionDescriptor> {
    config.descriptor_builder()?.build(spec)
}

/// Check that a module name is a non-empty dotted identifier
///
/// # Errors
///
/// Returns [`ResolveError::InvalidModuleNameError`] naming the offending value.
pub fn validate_module_name(name: &str) -> Result<()> {
    if MODULE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ResolveError::InvalidModuleNameError {
            name: name.to_string(),
        })
    }
}

/// Name, then sources, then reserved options
fn validate_spec(spec: &ExtensionSpec) -> Result<()> {
    validate_module_name(&spec.module_name)?;

    if spec.source_files.is_empty() {
        return Err(ResolveError::NoSourcesError {
            module: spec.module_name.clone(),
        });
    }

    if let Some(key) = spec
        .options
        .keys()
        .find(|key| RESERVED_OPTIONS.contains(&key.as_str()))
    {
        return Err(ResolveError::ReservedOption { key: key.clone() });
    }

    Ok(())
}

/// Project root first, then caller directories, dropping exact duplicates
fn merge_include_dirs(project_root: &Path, caller_dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut merged = vec![project_root.to_path_buf()];
    for dir in caller_dirs {
        if !merged.contains(&dir) {
            merged.push(dir);
        }
    }
    merged
}
