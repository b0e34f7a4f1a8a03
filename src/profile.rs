//! Build profile selection
//!
//! Exactly two profiles exist. Their optimization level, debug symbols and
//! diagnostic cap always move together, so a profile is a tag rather than a
//! bag of independent flags.

use crate::error::Result;
use crate::literal::parse_flag;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Compiler-level choices selected as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildProfile {
    /// No optimization, debug symbols, stop after a few diagnostics
    Debug,
    /// Aggressive optimization, no debug symbols, unbounded diagnostics
    #[default]
    Release,
}

impl BuildProfile {
    /// Diagnostic cap used by the debug profile
    pub const DEBUG_MAX_DIAGNOSTICS: u32 = 5;

    #[must_use]
    pub const fn optimization_level(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Release => 3,
        }
    }

    #[must_use]
    pub const fn debug_symbols(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Number of compiler diagnostics surfaced before aborting, `None` for unbounded
    #[must_use]
    pub const fn max_diagnostics(self) -> Option<u32> {
        match self {
            Self::Debug => Some(Self::DEBUG_MAX_DIAGNOSTICS),
            Self::Release => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Serialized as its settings rather than the variant name
impl Serialize for BuildProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BuildProfile", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("optimization_level", &self.optimization_level())?;
        state.serialize_field("debug_symbols", &self.debug_symbols())?;
        state.serialize_field("max_diagnostics", &self.max_diagnostics())?;
        state.end()
    }
}

/// Resolve the build profile from the raw debug switch.
///
/// An absent switch selects [`BuildProfile::Release`]. A present switch must be
/// a boolean or numeric literal: truthy selects [`BuildProfile::Debug`].
///
/// # Errors
///
/// Returns [`crate::ResolveError::ConfigParseError`] when the switch is present
/// but malformed. Malformed input never falls back to a default.
pub fn resolve_profile(raw_flag: Option<&str>) -> Result<BuildProfile> {
    let debug = raw_flag.map(parse_flag).transpose()?.unwrap_or(false);
    let profile = if debug {
        BuildProfile::Debug
    } else {
        BuildProfile::Release
    };

    crate::debug!("Selected {profile} profile (flag: {raw_flag:?})");
    Ok(profile)
}
