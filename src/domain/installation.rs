//! Discovered installation records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One located application bundle on disk.
///
/// Records are created fresh for each scan pass and superseded wholesale by
/// the next pass; they are never cached across scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredInstallation {
    /// Bundle identifier read from the bundle metadata
    pub bundle_id: String,
    /// Filesystem path of the bundle
    pub path: PathBuf,
    /// Short (marketing) version string, may be empty if unreadable
    pub short_version: String,
    /// Full (build) version string, may be empty if unreadable
    pub full_version: String,
}

impl DiscoveredInstallation {
    /// Create a new installation record
    pub fn new(
        bundle_id: impl Into<String>,
        path: impl Into<PathBuf>,
        short_version: impl Into<String>,
        full_version: impl Into<String>,
    ) -> Self {
        Self {
            bundle_id: bundle_id.into(),
            path: path.into(),
            short_version: short_version.into(),
            full_version: full_version.into(),
        }
    }
}

impl fmt::Display for DiscoveredInstallation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) at {}",
            self.bundle_id,
            self.short_version,
            self.full_version,
            self.path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let inst =
            DiscoveredInstallation::new("com.apple.Aperture", "/Applications/Aperture.app", "3.6", "3.6");
        assert_eq!(inst.bundle_id, "com.apple.Aperture");
        assert_eq!(inst.path, PathBuf::from("/Applications/Aperture.app"));
        assert_eq!(inst.short_version, "3.6");
        assert_eq!(inst.full_version, "3.6");
    }

    #[test]
    fn test_display() {
        let inst = DiscoveredInstallation::new("com.apple.iPhoto", "/Applications/iPhoto.app", "9.6.1", "910.42");
        let text = format!("{}", inst);
        assert!(text.contains("com.apple.iPhoto"));
        assert!(text.contains("9.6.1"));
        assert!(text.contains("iPhoto.app"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let inst = DiscoveredInstallation::new("com.apple.iPhoto", "/Applications/iPhoto.app", "9.6.1", "910.42");
        let json = serde_json::to_string(&inst).unwrap();
        let parsed: DiscoveredInstallation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, inst);
    }
}
