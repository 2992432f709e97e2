//! Eligibility resolution
//!
//! Classifies the installations discovered by one scan pass against the
//! active compatibility catalog. Resolution always terminates in exactly
//! one ClassificationOutcome; "nothing compatible found" is a normal
//! classification, never an error.

use crate::catalog::CompatibilityCatalog;
use crate::domain::{ClassificationOutcome, DiscoveredInstallation};
use crate::scanner::BundleInfo;
use crate::version::{compare_versions, normalize_version};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Result of validating a manually located bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualSelection {
    /// The selected bundle is a valid patch candidate
    Accepted {
        /// Location of the bundle
        path: PathBuf,
        /// Full (build) version string
        full_version: String,
        /// Short (marketing) version string
        short_version: String,
    },
    /// The selected bundle is not a valid copy of the target
    Rejected {
        /// Short version of the rejected bundle, for messaging
        short_version: String,
    },
}

/// Decision engine classifying scan results against one catalog
pub struct EligibilityResolver<'a> {
    catalog: &'a CompatibilityCatalog,
}

impl<'a> EligibilityResolver<'a> {
    /// Create a resolver over the given catalog
    pub fn new(catalog: &'a CompatibilityCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve one scan pass to a single classification outcome.
    ///
    /// Precedence, in a single pass over the candidates:
    /// 1. An already-patched candidate wins immediately and stops the scan.
    /// 2. The first compatible candidate is recorded; later compatible
    ///    candidates never overwrite it.
    /// 3. Otherwise the first incompatible version is tracked, except that
    ///    a later minor-update-eligible candidate replaces an earlier
    ///    non-eligible one, because filesystem enumeration order is
    ///    arbitrary and the minor-update message is the more actionable
    ///    one.
    pub fn resolve(&self, candidates: &[DiscoveredInstallation]) -> ClassificationOutcome {
        let mut compatible: Option<&DiscoveredInstallation> = None;
        let mut incompatible: Option<(&str, bool)> = None;

        for candidate in candidates {
            if self.catalog.is_already_patched(
                &candidate.bundle_id,
                &candidate.full_version,
                &candidate.short_version,
            ) {
                return ClassificationOutcome::AlreadyPatched {
                    path: candidate.path.clone(),
                };
            }

            if self.catalog.is_compatible(&candidate.short_version) {
                if compatible.is_none() {
                    compatible = Some(candidate);
                }
            } else {
                let needs_minor_update = self
                    .catalog
                    .requires_only_minor_update(&candidate.short_version);
                match incompatible {
                    None => incompatible = Some((&candidate.short_version, needs_minor_update)),
                    Some((_, false)) if needs_minor_update => {
                        incompatible = Some((&candidate.short_version, true));
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(found) = compatible {
            if self.compatible_build_is_outdated(&found.full_version) {
                return ClassificationOutcome::CompatibleOutdatedBuild {
                    path: found.path.clone(),
                    short_version: found.short_version.clone(),
                };
            }
            return ClassificationOutcome::CompatibleUnpatched {
                path: found.path.clone(),
                full_version: found.full_version.clone(),
                short_version: found.short_version.clone(),
            };
        }

        match incompatible {
            Some((version, needs_minor_update)) => {
                if self.catalog.is_too_new(version) {
                    ClassificationOutcome::IncompatibleTooNew {
                        short_version: version.to_string(),
                    }
                } else {
                    ClassificationOutcome::IncompatibleTooOld {
                        short_version: version.to_string(),
                        only_needs_minor_update: needs_minor_update,
                    }
                }
            }
            None => ClassificationOutcome::NotInstalled,
        }
    }

    /// A compatible install whose build number is numerically older than
    /// the catalog's most recent compatible entry gets an optional update
    /// recommendation instead of proceeding straight to patching.
    fn compatible_build_is_outdated(&self, full_version: &str) -> bool {
        match self.catalog.latest_compatible() {
            Some(latest) => {
                compare_versions(&normalize_version(full_version), latest) == Ordering::Less
            }
            None => false,
        }
    }

    /// Validate a manually located bundle.
    ///
    /// Accepted when either version string is in the compatible list and
    /// the bundle identifier is contained in the target's existing or
    /// patched bundle id; rejected otherwise.
    pub fn validate_manual_selection(&self, info: &BundleInfo, path: &Path) -> ManualSelection {
        let target = self.catalog.target();
        let version_matches = self.catalog.is_compatible(&info.full_version)
            || self.catalog.is_compatible(&info.short_version);
        let identifier_matches = !info.bundle_id.is_empty()
            && (target.existing_bundle_id.contains(&info.bundle_id)
                || target.patched_bundle_id.contains(&info.bundle_id));

        if version_matches && identifier_matches {
            ManualSelection::Accepted {
                path: path.to_path_buf(),
                full_version: info.full_version.clone(),
                short_version: info.short_version.clone(),
            }
        } else {
            ManualSelection::Rejected {
                short_version: info.short_version.clone(),
            }
        }
    }
}
