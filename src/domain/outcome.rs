//! Classification outcome of resolving a scan against a target

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result of resolving one scan pass against one application target.
///
/// Resolution over any candidate set terminates in exactly one of these
/// variants; "no compatible app found" is a normal classification, never an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    /// A patched install already exists at this path
    AlreadyPatched {
        /// Location of the patched bundle
        path: PathBuf,
    },
    /// A compatible, unpatched install was found
    CompatibleUnpatched {
        /// Location of the bundle
        path: PathBuf,
        /// Full (build) version string
        full_version: String,
        /// Short (marketing) version string
        short_version: String,
    },
    /// A compatible install was found, but its build is older than the
    /// latest compatible build; an optional update is recommended
    CompatibleOutdatedBuild {
        /// Location of the bundle
        path: PathBuf,
        /// Short (marketing) version string
        short_version: String,
    },
    /// Only incompatible installs older than the patchable range were found
    IncompatibleTooOld {
        /// The incompatible version surfaced to the user
        short_version: String,
        /// True when an in-place minor update would make it compatible
        only_needs_minor_update: bool,
    },
    /// Only incompatible installs newer than the patchable range were found
    IncompatibleTooNew {
        /// The incompatible version surfaced to the user
        short_version: String,
    },
    /// No candidate install was found at all
    NotInstalled,
}

impl ClassificationOutcome {
    /// Returns true when a usable install was located (patched or not)
    pub fn has_usable_install(&self) -> bool {
        matches!(
            self,
            ClassificationOutcome::AlreadyPatched { .. }
                | ClassificationOutcome::CompatibleUnpatched { .. }
                | ClassificationOutcome::CompatibleOutdatedBuild { .. }
        )
    }

    /// Returns true for the NotInstalled variant
    pub fn is_not_installed(&self) -> bool {
        matches!(self, ClassificationOutcome::NotInstalled)
    }

    /// The bundle path, when the outcome carries one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ClassificationOutcome::AlreadyPatched { path }
            | ClassificationOutcome::CompatibleUnpatched { path, .. }
            | ClassificationOutcome::CompatibleOutdatedBuild { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ClassificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationOutcome::AlreadyPatched { path } => {
                write!(f, "already patched at {}", path.display())
            }
            ClassificationOutcome::CompatibleUnpatched {
                path,
                short_version,
                ..
            } => write!(
                f,
                "compatible unpatched {} at {}",
                short_version,
                path.display()
            ),
            ClassificationOutcome::CompatibleOutdatedBuild {
                path,
                short_version,
            } => write!(
                f,
                "compatible {} at {} (outdated build)",
                short_version,
                path.display()
            ),
            ClassificationOutcome::IncompatibleTooOld {
                short_version,
                only_needs_minor_update,
            } => {
                if *only_needs_minor_update {
                    write!(f, "incompatible {} (minor update available)", short_version)
                } else {
                    write!(f, "incompatible {} (too old)", short_version)
                }
            }
            ClassificationOutcome::IncompatibleTooNew { short_version } => {
                write!(f, "incompatible {} (too new)", short_version)
            }
            ClassificationOutcome::NotInstalled => write!(f, "not installed"),
        }
    }
}
