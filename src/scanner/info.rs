//! Bundle metadata reading with explicit cache invalidation
//!
//! The same filesystem path may be rewritten by an install or update
//! between observations, so callers must invalidate before re-reading.

use crate::error::ScanError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Metadata read from one application bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleInfo {
    /// Bundle identifier (CFBundleIdentifier)
    pub bundle_id: String,
    /// Short version string (CFBundleShortVersionString), may be empty
    pub short_version: String,
    /// Full build version (CFBundleVersion), may be empty
    pub full_version: String,
}

/// Reader for bundle metadata
pub trait InfoReader: Send + Sync {
    /// Drop any cached metadata for this bundle path
    fn invalidate(&self, path: &Path);

    /// Read the bundle's metadata
    fn read_info(&self, path: &Path) -> Result<BundleInfo, ScanError>;
}

/// On-disk representation of the keys we read from Info.plist.
///
/// The reader consumes the JSON property-list form of Info.plist
/// (`plutil -convert json`). Missing version keys default to empty, which
/// downstream classification treats as unreadable-but-present.
#[derive(Debug, Deserialize)]
struct InfoPlist {
    #[serde(rename = "CFBundleIdentifier", default)]
    bundle_id: String,
    #[serde(rename = "CFBundleShortVersionString", default)]
    short_version: String,
    #[serde(rename = "CFBundleVersion", default)]
    full_version: String,
}

/// Filesystem-backed InfoReader with a per-path cache
pub struct FsInfoReader {
    cache: Mutex<HashMap<PathBuf, BundleInfo>>,
}

impl FsInfoReader {
    /// Create a new reader with an empty cache
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn info_plist_path(bundle_path: &Path) -> PathBuf {
        bundle_path.join("Contents").join("Info.plist")
    }
}

impl Default for FsInfoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoReader for FsInfoReader {
    fn invalidate(&self, path: &Path) {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.remove(path);
    }

    fn read_info(&self, path: &Path) -> Result<BundleInfo, ScanError> {
        {
            let cache = self
                .cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(info) = cache.get(path) {
                return Ok(info.clone());
            }
        }

        let plist_path = Self::info_plist_path(path);
        let content = std::fs::read_to_string(&plist_path)
            .map_err(|e| ScanError::info_unreadable(path, e.to_string()))?;
        let parsed: InfoPlist = serde_json::from_str(&content)
            .map_err(|e| ScanError::info_malformed(path, e.to_string()))?;

        let info = BundleInfo {
            bundle_id: parsed.bundle_id,
            short_version: parsed.short_version,
            full_version: parsed.full_version,
        };

        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(path.to_path_buf(), info.clone());
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
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

    #[test]
    fn test_read_info() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "Aperture.app", "com.apple.Aperture", "3.6", "3.6");

        let reader = FsInfoReader::new();
        let info = reader.read_info(&bundle).unwrap();
        assert_eq!(info.bundle_id, "com.apple.Aperture");
        assert_eq!(info.short_version, "3.6");
        assert_eq!(info.full_version, "3.6");
    }

    #[test]
    fn test_read_info_missing_version_keys_default_empty() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("Mystery.app");
        fs::create_dir_all(bundle.join("Contents")).unwrap();
        fs::write(
            bundle.join("Contents").join("Info.plist"),
            r#"{"CFBundleIdentifier":"com.example.mystery"}"#,
        )
        .unwrap();

        let reader = FsInfoReader::new();
        let info = reader.read_info(&bundle).unwrap();
        assert_eq!(info.bundle_id, "com.example.mystery");
        assert_eq!(info.short_version, "");
        assert_eq!(info.full_version, "");
    }

    #[test]
    fn test_read_info_missing_bundle() {
        let dir = TempDir::new().unwrap();
        let reader = FsInfoReader::new();
        let err = reader.read_info(&dir.path().join("Missing.app")).unwrap_err();
        assert!(matches!(err, ScanError::InfoUnreadable { .. }));
    }

    #[test]
    fn test_read_info_malformed_plist() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("Broken.app");
        fs::create_dir_all(bundle.join("Contents")).unwrap();
        fs::write(bundle.join("Contents").join("Info.plist"), "not json").unwrap();

        let reader = FsInfoReader::new();
        let err = reader.read_info(&bundle).unwrap_err();
        assert!(matches!(err, ScanError::InfoMalformed { .. }));
    }

    #[test]
    fn test_cache_returns_stale_until_invalidated() {
        let dir = TempDir::new().unwrap();
        let bundle = write_bundle(dir.path(), "iTunes.app", "com.apple.iTunes", "12.6.3", "12.6.3.36");

        let reader = FsInfoReader::new();
        let first = reader.read_info(&bundle).unwrap();
        assert_eq!(first.short_version, "12.6.3");

        // Simulate an update rewriting the bundle in place
        write_bundle(dir.path(), "iTunes.app", "com.apple.iTunes", "12.6.5", "12.6.5.3");

        // Cached value still served until explicitly invalidated
        let cached = reader.read_info(&bundle).unwrap();
        assert_eq!(cached.short_version, "12.6.3");

        reader.invalidate(&bundle);
        let fresh = reader.read_info(&bundle).unwrap();
        assert_eq!(fresh.short_version, "12.6.5");
    }
}
