mod common;

use common::create_project;
use common::helpers::SAMPLE_METADATA;
use extplan::{
    BuildConfig, BuildProfile, ExtensionSpec, ManifestError, PackageMetadata, plan_package,
};

#[test]
fn loads_metadata_with_readme() {
    let project = create_project(&[
        ("package.toml", SAMPLE_METADATA),
        ("README.md", "# your-package-name\n"),
    ]);

    let metadata = PackageMetadata::load(&project.path().join("package.toml")).unwrap();

    assert_eq!(metadata.name, "your-package-name");
    assert_eq!(metadata.version, "0.1.0");
    assert_eq!(
        metadata.long_description.as_deref(),
        Some("# your-package-name\n")
    );
    assert_eq!(metadata.extras_require["test"], vec!["pytest"]);
    assert_eq!(metadata.classifiers.len(), 4);
    assert!(!metadata.zip_safe);
}

#[test]
fn short_python_version_passes_through() {
    let metadata = SAMPLE_METADATA.replace("version = \"0.1.0\"", "version = \"1.0\"");
    let project = create_project(&[("package.toml", &metadata), ("README.md", "")]);

    let metadata = PackageMetadata::load(&project.path().join("package.toml")).unwrap();

    assert_eq!(metadata.version, "1.0");
}

#[test]
fn missing_metadata_file() {
    let project = create_project(&[]);

    let err = PackageMetadata::load(&project.path().join("package.toml")).unwrap_err();

    assert!(matches!(err, ManifestError::ReadError { .. }));
}

#[test]
fn plans_whole_package() {
    let project = create_project(&[
        ("package.toml", SAMPLE_METADATA),
        ("README.md", "readme"),
        ("your_package_name/__init__.py", ""),
        ("your_package_name/tests/__init__.py", ""),
        ("your_package_name/module.cc", ""),
        ("your_package_name/other.cc", ""),
        ("your_package_name/module.h", ""),
    ]);
    let config = BuildConfig::new("your-package-name", project.path()).with_platform("linux");

    let manifest = plan_package(
        &config,
        &project.path().join("package.toml"),
        vec![
            ExtensionSpec::new("your_package_name.module", ["your_package_name/module.cc"]),
            ExtensionSpec::new("your_package_name.other", ["your_package_name/other.cc"]),
        ],
    )
    .unwrap();

    assert_eq!(
        manifest.metadata.packages,
        vec!["your_package_name", "your_package_name.tests"]
    );
    assert_eq!(manifest.ext_modules.len(), 2);
    for module in &manifest.ext_modules {
        assert_eq!(module.profile(), BuildProfile::Release);
        assert_eq!(module.dependency_files().len(), 1);
    }
    assert_eq!(
        manifest.ext_modules.first().map(|m| m.module_name()),
        Some("your_package_name.module")
    );
}

#[test]
fn duplicate_modules_abort_plan() {
    let project = create_project(&[("package.toml", SAMPLE_METADATA), ("README.md", "")]);
    let config = BuildConfig::new("your-package-name", project.path()).with_platform("linux");

    let err = plan_package(
        &config,
        &project.path().join("package.toml"),
        vec![
            ExtensionSpec::new("pkg.module", ["a.cc"]),
            ExtensionSpec::new("pkg.module", ["b.cc"]),
        ],
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::DuplicateModule(name)) if name == "pkg.module"
    ));
}
