//! Environment variable names and reads.
//!
//! These are the only places the process environment is consulted. Callers
//! capture the values once into a [`crate::BuildConfig`].

use std::env;

/// Variable enabling diagnostic logging
pub const VERBOSE_VAR: &str = "EXTPLAN_VERBOSE";

// Helper for boolean environment variables that accept "1", "true", "yes"
fn is_enabled(var: &str) -> bool {
    env::var(var).ok().is_some_and(|s| is_enabled_value(&s))
}

fn is_enabled_value(value: &str) -> bool {
    let s = value.to_lowercase();
    s == "1" || s == "true" || s == "yes"
}

/// Name of the debug build switch for a package.
///
/// Upper-cases the package name and replaces `-` and `.` with `_`.
/// Example: `my-pkg` -> `MY_PKG_DEBUG_BUILD`
pub fn debug_build_var(package_name: &str) -> String {
    let prefix = package_name.replace(['-', '.'], "_").to_uppercase();
    format!("{prefix}_DEBUG_BUILD")
}

/// Raw value of the debug build switch, `None` when unset.
///
/// A value that is not valid UTF-8 is returned lossily so that it is reported
/// as malformed rather than treated as absent.
pub fn debug_build_flag(package_name: &str) -> Option<String> {
    env::var_os(debug_build_var(package_name)).map(|v| v.to_string_lossy().into_owned())
}

/// Check if diagnostic logging is enabled (`EXTPLAN_VERBOSE`).
pub fn verbose_enabled() -> bool {
    is_enabled(VERBOSE_VAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_build_var_naming() {
        assert_eq!(debug_build_var("pickle"), "PICKLE_DEBUG_BUILD");
        assert_eq!(debug_build_var("my-pkg"), "MY_PKG_DEBUG_BUILD");
        assert_eq!(debug_build_var("ns.pkg_name"), "NS_PKG_NAME_DEBUG_BUILD");
    }

    #[test]
    fn verbose_parsing_true_variants() {
        assert!(is_enabled_value("1"));
        assert!(is_enabled_value("true"));
        assert!(is_enabled_value("YES"));
    }

    #[test]
    fn verbose_parsing_false_variants() {
        assert!(!is_enabled_value("0"));
        assert!(!is_enabled_value("no"));
        assert!(!is_enabled_value(""));
    }

    #[test]
    fn unset_debug_flag_is_absent() {
        assert_eq!(debug_build_flag("extplan-test-never-set-package"), None);
    }
}
