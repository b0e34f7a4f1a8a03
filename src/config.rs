//! Build configuration captured once per invocation
//!
//! The environment is read in exactly one place, [`BuildConfig::from_env`].
//! Everything downstream receives the resulting value explicitly.

use crate::descriptor::DescriptorBuilder;
use crate::env_vars;
use crate::error::Result;
use crate::platform::detect_host_platform;
use crate::profile::{BuildProfile, resolve_profile};
use std::path::{Path, PathBuf};

/// Inputs that determine a build plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Distribution package name (e.g., "my-package")
    pub package_name: String,

    /// Project root; always the first include directory
    pub project_root: PathBuf,

    /// Platform id used for platform-conditional compiler arguments
    pub platform_id: String,

    /// Raw debug build switch, `None` when unset
    pub debug_flag: Option<String>,
}

impl BuildConfig {
    /// Create a configuration for the host platform with no debug switch
    pub fn new(package_name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            package_name: package_name.into(),
            project_root: project_root.into(),
            platform_id: detect_host_platform(),
            debug_flag: None,
        }
    }

    /// Capture the configuration from the process environment.
    ///
    /// Reads `<PACKAGE>_DEBUG_BUILD` and detects the host platform.
    pub fn from_env(package_name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(package_name, project_root);
        config.debug_flag = env_vars::debug_build_flag(&config.package_name);

        crate::debug!(
            "Captured build config for {} ({}={:?}, platform {})",
            config.package_name,
            env_vars::debug_build_var(&config.package_name),
            config.debug_flag,
            config.platform_id
        );
        config
    }

    /// Override the platform id
    #[must_use]
    pub fn with_platform(mut self, platform_id: impl Into<String>) -> Self {
        self.platform_id = platform_id.into();
        self
    }

    /// Set the raw debug build switch
    #[must_use]
    pub fn with_debug_flag(mut self, raw: impl Into<String>) -> Self {
        self.debug_flag = Some(raw.into());
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve the build profile from the debug switch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResolveError::ConfigParseError`] for a malformed switch.
    pub fn profile(&self) -> Result<BuildProfile> {
        resolve_profile(self.debug_flag.as_deref())
    }

    /// Create a descriptor builder wired with the resolved profile.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResolveError::ConfigParseError`] for a malformed switch.
    pub fn descriptor_builder(&self) -> Result<DescriptorBuilder> {
        Ok(DescriptorBuilder::new(
            self.project_root.clone(),
            self.platform_id.clone(),
            self.profile()?,
        ))
    }
}
