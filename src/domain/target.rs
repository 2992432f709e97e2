//! Application target identity and compatibility data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a supported legacy application target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    /// Aperture 3.6
    Aperture,
    /// iPhoto 9.6.x
    IPhoto,
    /// iTunes 12.9.5 (dark mode)
    ITunesDarkMode,
    /// iTunes 12.6.5 (App Store support)
    ITunesAppStore,
    /// iTunes 11.4 (classic theme)
    ITunesClassicTheme,
    /// iTunes 10.7 (CoverFlow)
    ITunesCoverFlow,
    /// Final Cut Pro 7
    FinalCutPro7,
    /// Logic Pro 9
    LogicPro9,
    /// Keynote 5 (iWork '09)
    Keynote5,
}

impl TargetId {
    /// All supported targets
    pub fn all() -> &'static [TargetId] {
        &[
            TargetId::Aperture,
            TargetId::IPhoto,
            TargetId::ITunesDarkMode,
            TargetId::ITunesAppStore,
            TargetId::ITunesClassicTheme,
            TargetId::ITunesCoverFlow,
            TargetId::FinalCutPro7,
            TargetId::LogicPro9,
            TargetId::Keynote5,
        ]
    }

    /// Stable key used on the CLI and in catalog documents
    pub fn key(&self) -> &'static str {
        match self {
            TargetId::Aperture => "aperture",
            TargetId::IPhoto => "iphoto",
            TargetId::ITunesDarkMode => "itunes-dark-mode",
            TargetId::ITunesAppStore => "itunes-app-store",
            TargetId::ITunesClassicTheme => "itunes-classic",
            TargetId::ITunesCoverFlow => "itunes-coverflow",
            TargetId::FinalCutPro7 => "final-cut-pro-7",
            TargetId::LogicPro9 => "logic-pro-9",
            TargetId::Keynote5 => "keynote-5",
        }
    }

    /// Human-readable application name
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetId::Aperture => "Aperture",
            TargetId::IPhoto => "iPhoto",
            TargetId::ITunesDarkMode
            | TargetId::ITunesAppStore
            | TargetId::ITunesClassicTheme
            | TargetId::ITunesCoverFlow => "iTunes",
            TargetId::FinalCutPro7 => "Final Cut Pro 7",
            TargetId::LogicPro9 => "Logic Pro 9",
            TargetId::Keynote5 => "Keynote ’09",
        }
    }

    /// Look up a target by its CLI/catalog key
    pub fn from_key(key: &str) -> Option<TargetId> {
        TargetId::all().iter().copied().find(|t| t.key() == key)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Compatibility data for one application target.
///
/// `compatible_versions` is ordered most-recent first; the first element is
/// the canonical latest compatible version. The list is non-empty for any
/// target that supports automated patching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTarget {
    /// Which application this is
    pub id: TargetId,
    /// Display name for messaging
    pub name: String,
    /// Bundle identifier to search for on disk
    pub existing_bundle_id: String,
    /// Bundle identifier indicating an already-patched install
    pub patched_bundle_id: String,
    /// Version marker written by the patcher into a patched bundle.
    ///
    /// None when patching leaves the version strings untouched; patched
    /// detection then relies on the bundle identifier alone.
    pub patched_version_marker: Option<String>,
    /// Version strings accepted for patching, most recent first
    pub compatible_versions: Vec<String>,
    /// Display version used for messaging
    pub latest_user_facing_version: String,
    /// Newest build obtainable via an in-place update, when one exists
    pub latest_update_version: Option<String>,
    /// Newest Mac model the patch is known to work on, when bounded
    pub newest_compatible_machine: Option<String>,
}

impl AppTarget {
    /// The canonical latest compatible version (first list entry)
    pub fn latest_compatible(&self) -> Option<&str> {
        self.compatible_versions.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_targets_have_unique_keys() {
        let keys: Vec<_> = TargetId::all().iter().map(|t| t.key()).collect();
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn test_from_key_roundtrip() {
        for target in TargetId::all() {
            assert_eq!(TargetId::from_key(target.key()), Some(*target));
        }
    }

    #[test]
    fn test_from_key_unknown() {
        assert_eq!(TargetId::from_key("garageband"), None);
        assert_eq!(TargetId::from_key(""), None);
    }

    #[test]
    fn test_itunes_variants_share_display_name() {
        assert_eq!(TargetId::ITunesDarkMode.display_name(), "iTunes");
        assert_eq!(TargetId::ITunesCoverFlow.display_name(), "iTunes");
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(format!("{}", TargetId::FinalCutPro7), "final-cut-pro-7");
    }

    #[test]
    fn test_latest_compatible() {
        let target = AppTarget {
            id: TargetId::IPhoto,
            name: "iPhoto".to_string(),
            existing_bundle_id: "com.apple.iPhoto".to_string(),
            patched_bundle_id: "com.apple.iPhoto9".to_string(),
            patched_version_marker: Some("99.9".to_string()),
            compatible_versions: vec!["9.6.1".to_string(), "9.6".to_string()],
            latest_user_facing_version: "9.6.1".to_string(),
            latest_update_version: None,
            newest_compatible_machine: None,
        };
        assert_eq!(target.latest_compatible(), Some("9.6.1"));
    }

    #[test]
    fn test_serde_target_id() {
        let json = serde_json::to_string(&TargetId::ITunesDarkMode).unwrap();
        assert_eq!(json, "\"i_tunes_dark_mode\"");
        let parsed: TargetId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TargetId::ITunesDarkMode);
    }
}
