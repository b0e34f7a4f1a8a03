//! Header dependency discovery
//!
//! Finds every header file under the project root. The external build tool
//! uses the set to decide whether a previously built module is stale.

use crate::error::{ResolveError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem capability: list the header files reachable from a root
pub trait HeaderDiscovery: Send + Sync {
    /// Discover header files under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DependencyDiscoveryError`] if `root` cannot be
    /// traversed.
    fn discover(&self, root: &Path) -> Result<BTreeSet<PathBuf>>;
}

/// Recursive directory walk matching header extensions
///
/// Paths are returned relative to the root. Like `**` globbing, entries whose
/// name starts with `.` are skipped. Symlinked headers are reported under
/// their link path; symlinked directories are not descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsHeaderDiscovery {
    extensions: Vec<String>,
}

impl FsHeaderDiscovery {
    /// Create a discovery matching the given file extensions (without the dot)
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl Default for FsHeaderDiscovery {
    fn default() -> Self {
        Self::with_extensions(["h"])
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

// Links are not followed, so a link to a file shows up as a symlink entry
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

impl HeaderDiscovery for FsHeaderDiscovery {
    fn discover(&self, root: &Path) -> Result<BTreeSet<PathBuf>> {
        let mut headers = BTreeSet::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = entry.map_err(|e| ResolveError::DependencyDiscoveryError {
                root: root.to_path_buf(),
                source: e.into(),
            })?;

            if is_file_like(&entry) && self.is_header(entry.path()) {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or_else(|_| entry.path());
                headers.insert(relative.to_path_buf());
            }
        }

        crate::debug!(
            "Discovered {} header file(s) under {}",
            headers.len(),
            root.display()
        );
        Ok(headers)
    }
}
