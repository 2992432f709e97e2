//! Orchestrator for the eligibility check workflow
//!
//! This module provides:
//! - Workflow coordination: refresh catalog → scan → resolve → route
//! - Manual bundle validation as an alternative to scanning
//! - Error handling with partial continuation: a failed catalog refresh
//!   keeps the built-in catalog in effect and is reported, not fatal

use crate::catalog::{
    apply_remote_document, builtin_target, CatalogStore, CompatibilityCatalog, RemoteCatalogClient,
};
use crate::cli::CliArgs;
use crate::domain::{
    AppTarget, ClassificationOutcome, DiscoveredInstallation, TargetId, WorkflowStage,
};
use crate::error::AppError;
use crate::progress::Progress;
use crate::resolver::{EligibilityResolver, ManualSelection};
use crate::router::route;
use crate::scanner::{FsInfoReader, FsMetadataSearch, InfoReader, InstallationScanner, MetadataSearch};
use crate::version::MachineModel;
use std::path::Path;
use std::sync::Arc;

/// Orchestrator coordinating one eligibility check
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Chosen application target
    target_id: TargetId,
    /// Active catalog, swapped wholesale on a successful refresh
    store: CatalogStore,
    /// Bundle metadata reader shared with the scanner
    reader: Arc<dyn InfoReader>,
    /// Installation scanner
    scanner: Arc<InstallationScanner>,
}

/// Result of running the orchestrator
pub struct OrchestratorResult {
    /// The target the check ran against (post-refresh catalog data)
    pub target: AppTarget,
    /// Classification of what was found on disk
    pub outcome: ClassificationOutcome,
    /// Workflow stage selected for the outcome
    pub stage: WorkflowStage,
    /// Whether the host machine is too new for this target's patch
    pub machine_too_new: bool,
    /// Non-fatal errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

/// Non-fatal errors that can occur during orchestration
#[derive(Debug)]
pub enum OrchestratorError {
    /// Remote catalog refresh failed; the built-in catalog stays in effect
    CatalogRefresh { message: String },
    /// The supplied machine model identifier could not be parsed
    MachineModel { value: String },
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::CatalogRefresh { message } => {
                write!(f, "catalog refresh failed, using built-in data: {}", message)
            }
            OrchestratorError::MachineModel { value } => {
                write!(f, "unrecognized machine model identifier: {}", value)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        args.validate()?;
        let target_id = args.target()?;
        let reader: Arc<dyn InfoReader> = Arc::new(FsInfoReader::new());
        let search: Arc<dyn MetadataSearch> = Arc::new(FsMetadataSearch::new(reader.clone()));
        Ok(Self::with_components(args, target_id, search, reader))
    }

    /// Create an orchestrator over custom search/reader components
    pub fn with_components(
        args: CliArgs,
        target_id: TargetId,
        search: Arc<dyn MetadataSearch>,
        reader: Arc<dyn InfoReader>,
    ) -> Self {
        let store = CatalogStore::new(CompatibilityCatalog::new(builtin_target(target_id)));
        let scanner = Arc::new(InstallationScanner::new(search, reader.clone()));
        Self {
            args,
            target_id,
            store,
            reader,
            scanner,
        }
    }

    /// Run the eligibility check workflow
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        let show_progress = !self.args.quiet && !self.args.json;
        let mut progress = Progress::new(show_progress);
        let mut errors = Vec::new();

        // Step 1: optional remote catalog refresh
        if let Some(url) = &self.args.catalog_url {
            progress.spinner("Refreshing compatibility catalog...");
            if let Err(e) = self.refresh_catalog(url).await {
                errors.push(OrchestratorError::CatalogRefresh {
                    message: e.to_string(),
                });
            }
            progress.finish_and_clear();
        }

        let catalog = self.store.current();
        let resolver = EligibilityResolver::new(&catalog);

        // Step 2: host machine check
        let machine_too_new = match &self.args.machine_model {
            Some(model) => {
                if MachineModel::parse(model).is_none() {
                    errors.push(OrchestratorError::MachineModel {
                        value: model.clone(),
                    });
                }
                catalog.machine_is_too_new(model)
            }
            None => false,
        };

        // Step 3: classify, either from a manual selection or a scan
        let outcome = match &self.args.locate {
            Some(path) => self.classify_manual(&resolver, &catalog, path)?,
            None => {
                progress.spinner(&format!(
                    "Scanning {} for {}...",
                    self.args.search_root.display(),
                    catalog.target().name
                ));
                let result = self.scan(&resolver).await;
                progress.finish_and_clear();
                result?
            }
        };

        // Step 4: route to the next workflow stage
        let stage = route(&outcome, catalog.target());

        Ok(OrchestratorResult {
            target: catalog.target().clone(),
            outcome,
            stage,
            machine_too_new,
            errors,
        })
    }

    /// Fetch the remote document and swap in the refreshed catalog.
    ///
    /// Any malformed field rejects the refresh as a whole; the previous
    /// catalog remains in effect.
    async fn refresh_catalog(&self, url: &str) -> Result<(), AppError> {
        let client = RemoteCatalogClient::new()?;
        let doc = client.fetch_document(url).await?;
        let current = self.store.current();
        let updated = apply_remote_document(current.target(), &doc)?;
        self.store.replace(CompatibilityCatalog::new(updated));
        Ok(())
    }

    /// Scan the search root and resolve the discovered installations
    async fn scan(
        &self,
        resolver: &EligibilityResolver<'_>,
    ) -> Result<ClassificationOutcome, AppError> {
        let catalog = self.store.current();
        let ticket = self.scanner.begin();
        let completion = self
            .scanner
            .run(
                &ticket,
                &catalog.target().existing_bundle_id,
                &self.args.search_root,
            )
            .await?;
        // No newer scan has begun, so the completion is always current
        // here; the check still guards against future callers racing.
        let installations = self.scanner.accept(completion).unwrap_or_default();
        Ok(resolver.resolve(&installations))
    }

    /// Classify a manually located bundle without scanning
    fn classify_manual(
        &self,
        resolver: &EligibilityResolver<'_>,
        catalog: &CompatibilityCatalog,
        path: &Path,
    ) -> Result<ClassificationOutcome, AppError> {
        self.reader.invalidate(path);
        let info = self.reader.read_info(path)?;

        match resolver.validate_manual_selection(&info, path) {
            ManualSelection::Accepted {
                path,
                full_version,
                short_version,
            } => {
                // Run the accepted bundle through normal resolution so the
                // outdated-build check still applies.
                let installation = DiscoveredInstallation::new(
                    info.bundle_id,
                    path,
                    short_version,
                    full_version,
                );
                Ok(resolver.resolve(&[installation]))
            }
            ManualSelection::Rejected { short_version } => {
                Ok(self.classify_rejected(catalog, &info, path, short_version))
            }
        }
    }

    /// A rejected manual selection still deserves the most specific
    /// classification available: a patched bundle reads as already
    /// patched, a right-app-wrong-version bundle as too old or too new,
    /// and an unrelated bundle as not installed.
    fn classify_rejected(
        &self,
        catalog: &CompatibilityCatalog,
        info: &crate::scanner::BundleInfo,
        path: &Path,
        short_version: String,
    ) -> ClassificationOutcome {
        if catalog.is_already_patched(&info.bundle_id, &info.full_version, &info.short_version) {
            return ClassificationOutcome::AlreadyPatched {
                path: path.to_path_buf(),
            };
        }
        let target = catalog.target();
        let identifier_matches = !info.bundle_id.is_empty()
            && (target.existing_bundle_id.contains(&info.bundle_id)
                || target.patched_bundle_id.contains(&info.bundle_id));
        if !identifier_matches {
            return ClassificationOutcome::NotInstalled;
        }
        if catalog.is_too_new(&short_version) {
            ClassificationOutcome::IncompatibleTooNew { short_version }
        } else {
            let only_needs_minor_update = catalog.requires_only_minor_update(&short_version);
            ClassificationOutcome::IncompatibleTooOld {
                short_version,
                only_needs_minor_update,
            }
        }
    }

    /// The target this orchestrator checks
    pub fn target_id(&self) -> TargetId {
        self.target_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_bundle(dir: &Path, name: &str, bundle_id: &str, short: &str, full: &str) -> PathBuf {
        let bundle = dir.join(name);
        fs::create_dir_all(bundle.join("Contents")).unwrap();
        fs::write(
            bundle.join("Contents").join("Info.plist"),
            format!(
                r#"{{"CFBundleIdentifier":"{}","CFBundleShortVersionString":"{}","CFBundleVersion":"{}"}}"#,
                bundle_id, short, full
            ),
        )
        .unwrap();
        bundle
    }

    fn orchestrator_for(args: &[&str]) -> Orchestrator {
        let args = CliArgs::parse_from(args);
        Orchestrator::new(args).unwrap()
    }

    #[tokio::test]
    async fn test_scan_compatible_install() {
        let dir = TempDir::new().unwrap();
        write_bundle(dir.path(), "Aperture.app", "com.apple.Aperture", "3.6", "3.6");

        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "aperture",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();

        assert!(matches!(
            result.outcome,
            ClassificationOutcome::CompatibleUnpatched { .. }
        ));
        assert!(matches!(
            result.stage,
            WorkflowStage::ProceedToAuthenticate { .. }
        ));
        assert!(result.errors.is_empty());
        assert!(!result.machine_too_new);
    }

    #[tokio::test]
    async fn test_scan_empty_root_is_not_installed() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "iphoto",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert_eq!(result.outcome, ClassificationOutcome::NotInstalled);
        assert!(matches!(result.stage, WorkflowStage::ShowGuidance { .. }));
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let orchestrator = orchestrator_for(&[
            "repatch",
            missing.to_str().unwrap(),
            "--app",
            "aperture",
            "--quiet",
        ]);
        assert!(orchestrator.run().await.is_err());
    }

    #[tokio::test]
    async fn test_machine_too_new_flagged() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "final-cut-pro-7",
            "--machine-model",
            "MacPro7,1",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert!(result.machine_too_new);
    }

    #[tokio::test]
    async fn test_unparseable_machine_model_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "final-cut-pro-7",
            "--machine-model",
            "hackintosh",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert!(!result.machine_too_new);
        assert!(matches!(
            result.errors.as_slice(),
            [OrchestratorError::MachineModel { .. }]
        ));
    }

    #[tokio::test]
    async fn test_locate_accepts_compatible_bundle() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "Aperture.app", "com.apple.Aperture", "3.6", "3.6");

        let orchestrator = orchestrator_for(&[
            "repatch",
            "--app",
            "aperture",
            "--locate",
            bundle.to_str().unwrap(),
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert_eq!(
            result.outcome,
            ClassificationOutcome::CompatibleUnpatched {
                path: bundle,
                full_version: "3.6".to_string(),
                short_version: "3.6".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_locate_patched_bundle_shows_completion() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "Aperture.app", "com.apple.Aperture3", "3.6", "99.9");

        let orchestrator = orchestrator_for(&[
            "repatch",
            "--app",
            "aperture",
            "--locate",
            bundle.to_str().unwrap(),
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert!(matches!(
            result.outcome,
            ClassificationOutcome::AlreadyPatched { .. }
        ));
        assert!(matches!(result.stage, WorkflowStage::ShowCompletion { .. }));
    }

    #[tokio::test]
    async fn test_locate_wrong_version_classifies_incompatible() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "Aperture.app", "com.apple.Aperture", "3.5", "3.5");

        let orchestrator = orchestrator_for(&[
            "repatch",
            "--app",
            "aperture",
            "--locate",
            bundle.to_str().unwrap(),
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert_eq!(
            result.outcome,
            ClassificationOutcome::IncompatibleTooOld {
                short_version: "3.5".to_string(),
                only_needs_minor_update: false,
            }
        );
    }

    #[tokio::test]
    async fn test_locate_unrelated_bundle_is_not_installed() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "Safari.app", "com.apple.Safari", "3.6", "3.6");

        let orchestrator = orchestrator_for(&[
            "repatch",
            "--app",
            "aperture",
            "--locate",
            bundle.to_str().unwrap(),
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert_eq!(result.outcome, ClassificationOutcome::NotInstalled);
    }

    #[tokio::test]
    async fn test_locate_missing_bundle_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Missing.app");
        let orchestrator = orchestrator_for(&[
            "repatch",
            "--app",
            "aperture",
            "--locate",
            missing.to_str().unwrap(),
            "--quiet",
        ]);
        assert!(orchestrator.run().await.is_err());
    }

    #[tokio::test]
    async fn test_failed_catalog_refresh_keeps_builtin_data() {
        let dir = TempDir::new().unwrap();
        write_bundle(dir.path(), "iTunes.app", "com.launcher.iTunes", "11.4", "11.4");

        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "itunes-classic",
            "--catalog-url",
            "http://127.0.0.1:1/catalog.json",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();

        // The refresh failure is reported, and classification proceeds
        // against the built-in catalog.
        assert!(matches!(
            result.errors.as_slice(),
            [OrchestratorError::CatalogRefresh { .. }]
        ));
        assert!(matches!(
            result.outcome,
            ClassificationOutcome::CompatibleUnpatched { .. }
        ));
    }

    #[tokio::test]
    async fn test_outdated_build_routes_to_update_offer() {
        let dir = TempDir::new().unwrap();
        write_bundle(
            dir.path(),
            "Logic Pro 9.app",
            "com.apple.logic.pro",
            "9.1.8",
            "1700.60",
        );

        let orchestrator = orchestrator_for(&[
            "repatch",
            dir.path().to_str().unwrap(),
            "--app",
            "logic-pro-9",
            "--quiet",
        ]);
        let result = orchestrator.run().await.unwrap();
        assert!(matches!(
            result.outcome,
            ClassificationOutcome::CompatibleOutdatedBuild { .. }
        ));
        assert!(matches!(
            result.stage,
            WorkflowStage::OfferOptionalUpdate { .. }
        ));
    }
}
