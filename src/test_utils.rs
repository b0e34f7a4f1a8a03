//! Shared test utilities for extplan tests
//!
//! Fixtures for throwaway project trees and stubbed header discovery.

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::discovery::HeaderDiscovery;
    use crate::error::{ResolveError, Result};
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Create a temporary project containing the given (empty) files
    pub(crate) fn create_project_tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");

        for file in files {
            let file_path = dir.path().join(file);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(&file_path, "").expect("Failed to write fixture file");
        }

        dir
    }

    /// Discovery returning a fixed set of headers regardless of the root
    #[derive(Debug, Default)]
    pub(crate) struct StaticDiscovery {
        pub(crate) headers: BTreeSet<PathBuf>,
    }

    impl StaticDiscovery {
        pub(crate) fn new(headers: &[&str]) -> Self {
            Self {
                headers: headers.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl HeaderDiscovery for StaticDiscovery {
        fn discover(&self, _root: &Path) -> Result<BTreeSet<PathBuf>> {
            Ok(self.headers.clone())
        }
    }

    /// Discovery returning fixed headers and counting how often it ran
    #[derive(Debug, Default)]
    pub(crate) struct CountingDiscovery {
        inner: StaticDiscovery,
        calls: AtomicUsize,
    }

    impl CountingDiscovery {
        pub(crate) fn new(headers: &[&str]) -> Self {
            Self {
                inner: StaticDiscovery::new(headers),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl HeaderDiscovery for CountingDiscovery {
        fn discover(&self, root: &Path) -> Result<BTreeSet<PathBuf>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.discover(root)
        }
    }

    /// Discovery that always fails with a permission error
    #[derive(Debug, Default)]
    pub(crate) struct FailingDiscovery;

    impl HeaderDiscovery for FailingDiscovery {
        fn discover(&self, root: &Path) -> Result<BTreeSet<PathBuf>> {
            Err(ResolveError::DependencyDiscoveryError {
                root: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }
}
