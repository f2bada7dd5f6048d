//! Version gate behaviour against manifests and probed environments

use lrvd::{
    check_compatibility, ComparisonOutcome, DependencyProbe, GateError, VersionRequirement,
};
use std::path::Path;

/// Environment with a fixed answer for every probe
struct Environment {
    installed: bool,
    distribution: Option<&'static str>,
    module: Option<&'static str>,
}

impl Environment {
    fn registered(version: &'static str) -> Self {
        Self {
            installed: true,
            distribution: Some(version),
            module: None,
        }
    }
}

impl DependencyProbe for Environment {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn distribution_version(&self) -> Option<String> {
        self.distribution.map(String::from)
    }

    fn module_version(&self) -> Option<String> {
        self.module.map(String::from)
    }
}

fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("pyproject.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn manifest_requirement_is_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        dir.path(),
        r#"
[project]
name = "lrvd"
dependencies = []

[tool.lrvd.requirements]
lerobot = "0.4.0"
"#,
    );

    let requirement = VersionRequirement::from_manifest(&path);
    assert_eq!(requirement.as_str(), "0.4.0");
}

#[test]
fn unusable_manifests_fall_back_to_default() {
    let dir = tempfile::tempdir().unwrap();

    let missing = VersionRequirement::from_manifest(dir.path().join("absent.toml"));
    assert_eq!(missing, VersionRequirement::default());

    let no_key = write_manifest(dir.path(), "[tool.lrvd]\nversion = \"1\"\n");
    assert_eq!(VersionRequirement::from_manifest(&no_key).as_str(), "0.2.0");

    let broken = write_manifest(dir.path(), "[tool.lrvd.requirements\nlerobot = \"9.0.0\"");
    assert_eq!(VersionRequirement::from_manifest(&broken).as_str(), "0.2.0");
}

#[test]
fn halts_only_when_installed_is_older() {
    let required = VersionRequirement::new("0.2.0");

    let older = check_compatibility(&required, &Environment::registered("0.1.9"));
    assert!(matches!(older, Err(GateError::IncompatibleVersion { .. })));

    let equal = check_compatibility(&required, &Environment::registered("0.2.0"));
    assert!(matches!(equal, Ok(ComparisonOutcome::Compatible { .. })));

    let newer = check_compatibility(&required, &Environment::registered("1.0.0"));
    assert!(matches!(newer, Ok(ComparisonOutcome::Compatible { .. })));
}

#[test]
fn missing_dependency_is_fatal() {
    let env = Environment {
        installed: false,
        distribution: Some("1.0.0"),
        module: Some("1.0.0"),
    };
    let err = check_compatibility(&VersionRequirement::default(), &env).unwrap_err();
    assert_eq!(err, GateError::MissingDependency);
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("lerobot is required but not installed"));
}

#[test]
fn development_checkout_uses_module_attribute() {
    let env = Environment {
        installed: true,
        distribution: None,
        module: Some("0.3.2"),
    };
    let outcome = check_compatibility(&VersionRequirement::new("0.2.0"), &env).unwrap();
    assert_eq!(
        outcome,
        ComparisonOutcome::Compatible {
            installed: "0.3.2".to_string(),
            required: "0.2.0".to_string(),
        }
    );
}

#[test]
fn unparsable_installed_version_passes() {
    let outcome =
        check_compatibility(&VersionRequirement::new("0.2.0"), &Environment::registered("dev"))
            .unwrap();
    assert_eq!(outcome, ComparisonOutcome::Indeterminate);
}

#[test]
fn old_development_release_is_incompatible() {
    let err = check_compatibility(
        &VersionRequirement::new("0.2.0"),
        &Environment::registered("0.2.0.dev0"),
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("0.2.0.dev0"));
    assert!(message.contains("pip install lrvd==0.1.0 --force-reinstall"));
}
