//! Build-configuration resolver for native extension modules
//!
//! Turns a handful of environment switches into a reproducible build plan for
//! a Python distribution that embeds a compiled module: a [`BuildProfile`], one
//! [`ExtensionDescriptor`] per module, and the [`PackageManifest`] handed to
//! the packaging tool.

pub mod config;
pub mod debug;
pub mod descriptor;
pub mod discovery;
pub mod env_vars;
pub mod error;
pub mod literal;
pub mod manifest;
pub mod plan;
pub mod platform;
pub mod profile;

#[cfg(test)]
mod test_utils;

// Re-export common types for convenience
pub use config::BuildConfig;
pub use debug::{init_debug, init_from_env, is_debug_enabled};
pub use descriptor::{
    DescriptorBuilder, ExtensionDescriptor, ExtensionSpec, build_descriptor, validate_module_name,
};
pub use discovery::{FsHeaderDiscovery, HeaderDiscovery};
pub use error::ResolveError;
pub use literal::parse_flag;
pub use manifest::{ManifestError, PackageManifest, PackageMetadata, discover_packages};
pub use plan::plan_package;
pub use platform::{PLATFORM_RULES, PlatformRule, detect_host_platform, platform_compile_args};
pub use profile::{BuildProfile, resolve_profile};
