//! Installation discovery
//!
//! This module provides:
//! - MetadataSearch: asynchronous bundle enumeration under a search scope
//! - InfoReader: bundle metadata reading with explicit cache invalidation
//! - InstallationScanner: scan lifecycle with generation-counted tickets so
//!   that only the most recently begun scan's completion is acted upon

mod info;

pub use info::{BundleInfo, FsInfoReader, InfoReader};

use crate::domain::DiscoveredInstallation;
use crate::error::ScanError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One bundle matched by a metadata search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Bundle identifier reported by the search index
    pub bundle_id: String,
    /// Filesystem path of the bundle
    pub path: PathBuf,
}

/// Filesystem/metadata search capability.
///
/// Implementations emit a finite set of hits for bundles whose identifier
/// contains the filter (case-insensitive). The search owns its own
/// completion signal; there is no timeout here.
#[async_trait]
pub trait MetadataSearch: Send + Sync {
    /// Enumerate bundles under `scope` whose identifier contains
    /// `bundle_id_contains`
    async fn search(
        &self,
        bundle_id_contains: &str,
        scope: &Path,
    ) -> Result<Vec<SearchHit>, ScanError>;
}

/// Directory-walking MetadataSearch over `.app` bundles
pub struct FsMetadataSearch {
    reader: Arc<dyn InfoReader>,
}

impl FsMetadataSearch {
    /// Create a search backed by the given metadata reader
    pub fn new(reader: Arc<dyn InfoReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl MetadataSearch for FsMetadataSearch {
    async fn search(
        &self,
        bundle_id_contains: &str,
        scope: &Path,
    ) -> Result<Vec<SearchHit>, ScanError> {
        if !scope.is_dir() {
            return Err(ScanError::invalid_scope(scope));
        }

        let needle = bundle_id_contains.to_lowercase();
        let mut hits = Vec::new();

        let mut entries = tokio::fs::read_dir(scope)
            .await
            .map_err(|e| ScanError::enumeration_failed(scope, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ScanError::enumeration_failed(scope, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("app") {
                continue;
            }
            // Bundles whose metadata cannot be read are not an error for
            // the search; they simply never match.
            let Ok(bundle_info) = self.reader.read_info(&path) else {
                continue;
            };
            if bundle_info.bundle_id.to_lowercase().contains(&needle) {
                hits.push(SearchHit {
                    bundle_id: bundle_info.bundle_id,
                    path,
                });
            }
        }

        Ok(hits)
    }
}

/// Handle identifying one scan initiation.
///
/// Tickets are compared by generation number, replacing implicit
/// pointer-identity comparison of query objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTicket {
    generation: u64,
}

impl ScanTicket {
    /// The generation this ticket belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Completion of one scan pass
#[derive(Debug, Clone)]
pub struct ScanCompletion {
    generation: u64,
    installations: Vec<DiscoveredInstallation>,
}

impl ScanCompletion {
    /// The generation of the scan that produced this completion
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The installations discovered, regardless of staleness
    pub fn installations(&self) -> &[DiscoveredInstallation] {
        &self.installations
    }
}

/// Scanner producing DiscoveredInstallation records for one target.
///
/// Beginning a new scan bumps the generation counter, which implicitly
/// cancels interest in any prior scan's completion without aborting its
/// in-flight I/O.
pub struct InstallationScanner {
    search: Arc<dyn MetadataSearch>,
    reader: Arc<dyn InfoReader>,
    generation: AtomicU64,
}

impl InstallationScanner {
    /// Create a scanner from a search capability and a metadata reader
    pub fn new(search: Arc<dyn MetadataSearch>, reader: Arc<dyn InfoReader>) -> Self {
        Self {
            search,
            reader,
            generation: AtomicU64::new(0),
        }
    }

    /// Create a scanner with the default filesystem search and reader
    pub fn with_filesystem() -> Self {
        let reader: Arc<dyn InfoReader> = Arc::new(FsInfoReader::new());
        let search: Arc<dyn MetadataSearch> = Arc::new(FsMetadataSearch::new(reader.clone()));
        Self::new(search, reader)
    }

    /// Begin a new scan, invalidating interest in all prior scans
    pub fn begin(&self) -> ScanTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ScanTicket { generation }
    }

    /// Check whether a ticket still identifies the most recent scan
    pub fn is_current(&self, ticket: &ScanTicket) -> bool {
        ticket.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Run the scan identified by `ticket`.
    ///
    /// Each candidate's metadata is invalidated and re-read immediately
    /// before use, because an install or update may have rewritten the
    /// path since the search observed it. Unreadable candidates are
    /// skipped; zero candidates is a normal, empty completion.
    pub async fn run(
        &self,
        ticket: &ScanTicket,
        bundle_id_contains: &str,
        scope: &Path,
    ) -> Result<ScanCompletion, ScanError> {
        let hits = self.search.search(bundle_id_contains, scope).await?;

        let mut installations = Vec::new();
        for hit in hits {
            self.reader.invalidate(&hit.path);
            let bundle_info = match self.reader.read_info(&hit.path) {
                Ok(fresh) => fresh,
                Err(_) => continue,
            };
            installations.push(DiscoveredInstallation::new(
                bundle_info.bundle_id,
                hit.path,
                bundle_info.short_version,
                bundle_info.full_version,
            ));
        }

        Ok(ScanCompletion {
            generation: ticket.generation,
            installations,
        })
    }

    /// Run the scan on a background task
    pub fn spawn(
        self: &Arc<Self>,
        ticket: &ScanTicket,
        bundle_id_contains: &str,
        scope: &Path,
    ) -> tokio::task::JoinHandle<Result<ScanCompletion, ScanError>> {
        let scanner = Arc::clone(self);
        let ticket = ticket.clone();
        let filter = bundle_id_contains.to_string();
        let scope = scope.to_path_buf();
        tokio::spawn(async move { scanner.run(&ticket, &filter, &scope).await })
    }

    /// Accept a completion, returning its installations only when it
    /// belongs to the most recently begun scan. Stale and duplicate
    /// completions yield None and are discarded.
    pub fn accept(&self, completion: ScanCompletion) -> Option<Vec<DiscoveredInstallation>> {
        if completion.generation == self.generation.load(Ordering::SeqCst) {
            Some(completion.installations)
        } else {
            None
        }
    }
}
