//! Compatibility catalog for application targets
//!
//! This module provides:
//! - CompatibilityCatalog: version membership, already-patched detection,
//!   too-new and minor-update-only derivations
//! - Built-in per-target compatibility data
//! - Remote catalog refresh with whole-document validation
//! - CatalogStore: atomic whole-value swap for concurrent readers

mod builtin;
mod remote;

pub use builtin::builtin_target;
pub use remote::{apply_remote_document, RemoteCatalogClient};

use crate::domain::AppTarget;
use crate::version::{is_newer_machine, is_newer_version};
use std::sync::{Arc, RwLock};

/// Immutable compatibility data for one chosen target.
///
/// Rebuilt wholesale when the user changes target or a remote refresh
/// succeeds; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityCatalog {
    target: AppTarget,
}

impl CompatibilityCatalog {
    /// Create a catalog for the given target
    pub fn new(target: AppTarget) -> Self {
        Self { target }
    }

    /// The target this catalog describes
    pub fn target(&self) -> &AppTarget {
        &self.target
    }

    /// Exact membership test against the compatible version list.
    ///
    /// Intentionally strict string equality, not a numeric range, so that
    /// unverified builds are never silently patched.
    pub fn is_compatible(&self, short_version: &str) -> bool {
        self.target
            .compatible_versions
            .iter()
            .any(|v| v == short_version)
    }

    /// Check whether a found bundle is already patched: its bundle id
    /// matches the patched id, or either version string matches the
    /// post-patch marker when the target defines one.
    pub fn is_already_patched(
        &self,
        bundle_id: &str,
        full_version: &str,
        short_version: &str,
    ) -> bool {
        if bundle_id == self.target.patched_bundle_id {
            return true;
        }
        match self.target.patched_version_marker.as_deref() {
            Some(marker) => full_version == marker || short_version == marker,
            None => false,
        }
    }

    /// The canonical latest compatible version
    pub fn latest_compatible(&self) -> Option<&str> {
        self.target.latest_compatible()
    }

    /// A found version is too new when it is newer than every compatible
    /// entry and newer than the latest known in-place update.
    pub fn is_too_new(&self, found_short_version: &str) -> bool {
        let newer_than_all = self
            .target
            .compatible_versions
            .iter()
            .all(|v| is_newer_version(found_short_version, v));
        let newer_than_update = self
            .target
            .latest_update_version
            .as_deref()
            .is_none_or(|u| is_newer_version(found_short_version, u));
        newer_than_all && newer_than_update
    }

    /// A found version only needs a minor update when it sits strictly
    /// between the most recent compatible version and the latest known
    /// in-place update, i.e. an update exists that would make it
    /// compatible without a full reinstall.
    pub fn requires_only_minor_update(&self, found_short_version: &str) -> bool {
        match (
            self.latest_compatible(),
            self.target.latest_update_version.as_deref(),
        ) {
            (Some(compatible), Some(update)) => {
                is_newer_version(found_short_version, compatible)
                    && is_newer_version(update, found_short_version)
            }
            _ => false,
        }
    }

    /// Check whether the host machine is too new for this target's patch
    pub fn machine_is_too_new(&self, model_identifier: &str) -> bool {
        match self.target.newest_compatible_machine.as_deref() {
            Some(newest) => is_newer_machine(model_identifier, newest),
            None => false,
        }
    }
}

/// Holder for the active catalog with atomic whole-value swap.
///
/// Readers observe either the fully-old or fully-new catalog, never a
/// partially updated one.
pub struct CatalogStore {
    inner: RwLock<Arc<CompatibilityCatalog>>,
}

impl CatalogStore {
    /// Create a store holding the given catalog
    pub fn new(catalog: CompatibilityCatalog) -> Self {
        Self {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Snapshot the current catalog
    pub fn current(&self) -> Arc<CompatibilityCatalog> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the catalog wholesale
    pub fn replace(&self, catalog: CompatibilityCatalog) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(catalog);
    }
}
