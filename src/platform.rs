//! Platform identification and platform-conditional compiler arguments
//!
//! Platform ids follow the packaging ecosystem's naming ("darwin", "linux",
//! "win32"). Extra compiler arguments come from a lookup table; supporting a
//! new platform means adding one [`PlatformRule`].

use std::env;
use std::sync::LazyLock;

/// Cached host platform (computed once, reused throughout execution)
static HOST_PLATFORM: LazyLock<String> = LazyLock::new(detect_platform_impl);

/// Extra compiler arguments for a family of platform ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRule {
    /// Platform ids (or `-`-separated id components) this rule applies to
    pub ids: &'static [&'static str],
    /// Arguments appended after the base compiler arguments
    pub args: &'static [&'static str],
}

impl PlatformRule {
    /// Check if this rule applies to a platform id
    ///
    /// Matches the whole id ("darwin") or any of its components, so variants
    /// like "arm64-darwin-23" match as well.
    #[must_use]
    pub fn matches(&self, platform_id: &str) -> bool {
        self.ids
            .iter()
            .any(|id| *id == platform_id || platform_id.split('-').any(|part| part == *id))
    }
}

/// Minimum macOS deployment target passed to the compiler
pub const MACOS_MIN_VERSION_ARG: &str = "-mmacosx-version-min=10.15";

/// Platform-conditional compiler arguments
pub const PLATFORM_RULES: &[PlatformRule] = &[PlatformRule {
    ids: &["darwin", "macos", "apple-desktop"],
    args: &[MACOS_MIN_VERSION_ARG],
}];

/// Get the host platform id
///
/// Examples: "darwin", "linux", "win32"
#[must_use]
pub fn detect_host_platform() -> String {
    HOST_PLATFORM.clone()
}

fn detect_platform_impl() -> String {
    platform_id_for_os(env::consts::OS).to_string()
}

fn platform_id_for_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        _ => os,
    }
}

/// Extra compiler arguments for a platform, in table order
#[must_use]
pub fn platform_compile_args(platform_id: &str) -> Vec<String> {
    PLATFORM_RULES
        .iter()
        .filter(|rule| rule.matches(platform_id))
        .flat_map(|rule| rule.args.iter().map(|arg| (*arg).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apple_desktop_gets_min_version() {
        assert_eq!(
            platform_compile_args("apple-desktop"),
            vec![MACOS_MIN_VERSION_ARG.to_string()]
        );
        assert_eq!(
            platform_compile_args("darwin"),
            vec![MACOS_MIN_VERSION_ARG.to_string()]
        );
    }

    #[test]
    fn platform_variants_match() {
        assert_eq!(platform_compile_args("arm64-darwin-23").len(), 1);
        assert_eq!(platform_compile_args("x86_64-darwin").len(), 1);
    }

    #[test]
    fn other_platforms_get_nothing() {
        assert!(platform_compile_args("linux").is_empty());
        assert!(platform_compile_args("win32").is_empty());
        assert!(platform_compile_args("x86_64-linux").is_empty());
        assert!(platform_compile_args("").is_empty());
    }

    #[test]
    fn os_names_map_to_platform_ids() {
        assert_eq!(platform_id_for_os("macos"), "darwin");
        assert_eq!(platform_id_for_os("windows"), "win32");
        assert_eq!(platform_id_for_os("linux"), "linux");
    }

    #[test]
    fn detect_platform() {
        let platform = detect_host_platform();
        assert!(!platform.is_empty());
        assert_eq!(platform, detect_host_platform());
    }
}
