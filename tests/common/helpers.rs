//! Shared test helpers and utilities

use std::fs;
use tempfile::TempDir;

/// Create a temporary project containing the given files
///
/// # Arguments
/// * `files` - Slice of (relative path, content) tuples
///
/// # Returns
/// The temporary project directory
pub(crate) fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for (path, content) in files {
        let file_path = dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&file_path, content).expect("Failed to write project file");
    }

    dir
}

/// Minimal package metadata for the sample project
#[allow(dead_code)]
pub(crate) const SAMPLE_METADATA: &str = r#"
name = "your-package-name"
version = "0.1.0"
description = "Python bindings for your-package-name, using libpy"
readme = "README.md"
url = ""
author = ""
author_email = ""
classifiers = [
    "Development Status :: 4 - Beta",
    "Programming Language :: Python :: Implementation :: CPython",
    "Programming Language :: C++",
    "Operating System :: POSIX",
]
install_requires = ["setuptools", "libpy"]

[extras_require]
test = ["pytest"]
benchmark = ["pytest-benchmark"]
"#;
