//! Build plan orchestration
//!
//! Entry point for the packaging tool's build hook. Captures the configuration,
//! resolves the profile, assembles every extension descriptor and the package
//! manifest. Any failure aborts the whole plan before compilation starts.

use crate::config::BuildConfig;
use crate::descriptor::ExtensionSpec;
use crate::manifest::{PackageManifest, PackageMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Resolve the complete build plan for a package.
///
/// `config` is captured once by the caller (normally via
/// [`BuildConfig::from_env`]); `metadata_path` points at the package's TOML
/// metadata.
///
/// Diagnostic logging is initialized from `EXTPLAN_VERBOSE` unless the caller
/// already chose a setting with [`crate::init_debug`].
///
/// # Example
///
/// ```no_run
/// use extplan::{BuildConfig, ExtensionSpec, plan_package};
/// use std::path::Path;
///
/// let config = BuildConfig::from_env("your-package-name", ".");
/// let manifest = plan_package(
///     &config,
///     Path::new("package.toml"),
///     vec![ExtensionSpec::new("your_package_name.module", ["your_package_name/module.cc"])],
/// )?;
///
/// for module in &manifest.ext_modules {
///     println!("{} -O{}", module.module_name(), module.optimization_level());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error naming the offending input if the debug switch, metadata,
/// any extension spec or header discovery is invalid.
pub fn plan_package(
    config: &BuildConfig,
    metadata_path: &Path,
    specs: Vec<ExtensionSpec>,
) -> Result<PackageManifest> {
    crate::debug::init_from_env();

    let builder = config.descriptor_builder().with_context(|| {
        format!(
            "Failed to resolve build profile for {}",
            config.package_name
        )
    })?;

    let metadata = PackageMetadata::load(metadata_path).with_context(|| {
        format!(
            "Failed to load package metadata: {}",
            metadata_path.display()
        )
    })?;

    let descriptors = builder
        .build_many(specs)
        .context("Failed to assemble extension modules")?;

    PackageManifest::assemble(metadata, &config.project_root, descriptors)
        .context("Failed to assemble package manifest")
}
