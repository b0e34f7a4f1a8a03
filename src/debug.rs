//! Diagnostic logging for build-plan resolution
//!
//! Resolution runs inside the packaging tool's build hook, so output goes to
//! stderr and is off unless enabled explicitly or via `EXTPLAN_VERBOSE`.
//! When disabled, logging has zero cost.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Enable or disable diagnostic logging. Only the first call takes effect.
pub fn init_debug(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled);
}

/// Initialize diagnostic logging from `EXTPLAN_VERBOSE`
pub fn init_from_env() {
    init_debug(crate::env_vars::verbose_enabled());
}

/// Check if diagnostic logging is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn is_initialized() -> bool {
    DEBUG_ENABLED.get().is_some()
}

/// Macro for formatted diagnostic logging
///
/// Usage: `debug!("resolved {} header files", count)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[extplan] {}", format_args!($($arg)*));
        }
    };
}
