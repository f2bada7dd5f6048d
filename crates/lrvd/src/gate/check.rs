//! Compatibility decision between installed and required `lerobot`

use super::{DependencyProbe, PackageVersion, VersionRequirement};

/// Result of comparing installed and required versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Installed version meets the requirement
    Compatible { installed: String, required: String },
    /// Installed version is strictly older than the requirement
    Incompatible { installed: String, required: String },
    /// No comparable installed version; treated as a pass
    Indeterminate,
}

/// Compare version strings; either side failing to parse is indeterminate
pub fn compare(installed: &str, required: &str) -> ComparisonOutcome {
    let parsed = PackageVersion::parse(installed).and_then(|i| {
        PackageVersion::parse(required).map(|r| (i, r))
    });

    match parsed {
        Ok((i, r)) if i < r => ComparisonOutcome::Incompatible {
            installed: installed.to_string(),
            required: required.to_string(),
        },
        Ok(_) => ComparisonOutcome::Compatible {
            installed: installed.to_string(),
            required: required.to_string(),
        },
        Err(e) => {
            log::debug!("Skipping lerobot version comparison: {}", e);
            ComparisonOutcome::Indeterminate
        }
    }
}

/// Check the installed dependency against `requirement`.
///
/// The registry version is preferred; the module attribute is only consulted
/// when the registry has no record. When neither is available the check
/// passes as [`ComparisonOutcome::Indeterminate`].
pub fn check_compatibility(
    requirement: &VersionRequirement,
    probe: &dyn DependencyProbe,
) -> Result<ComparisonOutcome, GateError> {
    if !probe.is_installed() {
        return Err(GateError::MissingDependency);
    }

    let installed = match probe
        .distribution_version()
        .or_else(|| probe.module_version())
    {
        Some(version) => version,
        None => {
            log::debug!("Installed lerobot version is unknown, assuming compatible");
            return Ok(ComparisonOutcome::Indeterminate);
        }
    };

    match compare(&installed, requirement.as_str()) {
        ComparisonOutcome::Incompatible {
            installed,
            required,
        } => Err(GateError::IncompatibleVersion {
            installed,
            required,
        }),
        outcome => {
            log::debug!(
                "lerobot {} satisfies requirement {}",
                installed,
                requirement
            );
            Ok(outcome)
        }
    }
}

/// Fatal gate failures. The display text is the operator-facing diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error(
        "
lerobot is required but not installed. did you activate your environment?

Please install lerobot v0.2.0 or higher.
"
    )]
    MissingDependency,

    #[error(
        "
WARNING: LeRobot version {installed} is installed, but version {required} or higher is required. \
LeRobot version 0.1.0 can be used, but only after June 1st 2025. It is possible that you already \
have the latest code, but the version is not recognized because this is an older development \
installation. You can ignore this warning if you don't encounter any issues.

OPTION 1: Upgrade your LeRobot installation to use a version of the code from after July 21st 2025
  cd <your lerobot installation directory>
  git pull
  pip install -e .

OPTION 2: If using LeRobot prior to June 1st 2025, you will need to use lrvd v0.1.0
    pip install lrvd==0.1.0 --force-reinstall

Please feel free to create an issue if you have questions

  https://github.com/brainwavecollective/lrv/issues
"
    )]
    IncompatibleVersion { installed: String, required: String },
}

impl GateError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}
