//! Built-in compatibility data for each supported target
//!
//! This table ships with the binary and is used as-is unless a remote
//! catalog refresh succeeds. Version lists are ordered most recent first.

use crate::domain::{AppTarget, TargetId};

/// Build the built-in compatibility data for a target
pub fn builtin_target(id: TargetId) -> AppTarget {
    match id {
        TargetId::Aperture => AppTarget {
            id,
            name: id.display_name().to_string(),
            existing_bundle_id: "com.apple.Aperture".to_string(),
            patched_bundle_id: "com.apple.Aperture3".to_string(),
            patched_version_marker: Some("99.9".to_string()),
            compatible_versions: vec!["3.6".to_string()],
            latest_user_facing_version: "3.6".to_string(),
            latest_update_version: None,
            newest_compatible_machine: None,
        },
        TargetId::IPhoto => AppTarget {
            id,
            name: id.display_name().to_string(),
            existing_bundle_id: "com.apple.iPhoto".to_string(),
            patched_bundle_id: "com.apple.iPhoto9".to_string(),
            patched_version_marker: Some("99.9".to_string()),
            compatible_versions: vec!["9.6.1".to_string(), "9.6".to_string()],
            latest_user_facing_version: "9.6.1".to_string(),
            latest_update_version: None,
            newest_compatible_machine: None,
        },
        TargetId::ITunesDarkMode => itunes_target(id, "12.9.5"),
        TargetId::ITunesAppStore => itunes_target(id, "12.6.5"),
        TargetId::ITunesClassicTheme => itunes_target(id, "11.4"),
        TargetId::ITunesCoverFlow => itunes_target(id, "10.7"),
        TargetId::FinalCutPro7 => AppTarget {
            id,
            name: id.display_name().to_string(),
            existing_bundle_id: "com.apple.FinalCutPro".to_string(),
            patched_bundle_id: "com.apple.FinalCutPro7".to_string(),
            patched_version_marker: Some("7.0.4".to_string()),
            compatible_versions: vec![
                "7.0.3".to_string(),
                "7.0.2".to_string(),
                "7.0.1".to_string(),
                "7.0".to_string(),
            ],
            latest_user_facing_version: "7.0.3".to_string(),
            latest_update_version: None,
            newest_compatible_machine: Some("MacPro6,1".to_string()),
        },
        TargetId::LogicPro9 => AppTarget {
            id,
            name: id.display_name().to_string(),
            existing_bundle_id: "com.apple.logic.pro".to_string(),
            patched_bundle_id: "com.apple.logic.pro9".to_string(),
            patched_version_marker: Some("1700.68".to_string()),
            compatible_versions: vec![
                "1700.67".to_string(),
                "9.1.8".to_string(),
                "9.1.7".to_string(),
                "9.1.6".to_string(),
                "9.1.5".to_string(),
                "9.1.4".to_string(),
                "9.1.3".to_string(),
                "9.1.2".to_string(),
                "9.1.1".to_string(),
                "9.1.0".to_string(),
                "9.1".to_string(),
                "9.0.2".to_string(),
                "9.0.1".to_string(),
                "9.0.0".to_string(),
                "9.0".to_string(),
            ],
            latest_user_facing_version: "9.1.8".to_string(),
            latest_update_version: None,
            newest_compatible_machine: None,
        },
        TargetId::Keynote5 => AppTarget {
            id,
            name: id.display_name().to_string(),
            existing_bundle_id: "com.apple.iWork.Keynote".to_string(),
            patched_bundle_id: "com.apple.iWork.Keynote5".to_string(),
            patched_version_marker: Some("1171".to_string()),
            compatible_versions: vec![
                "1170".to_string(),
                "5.3".to_string(),
                "5.2".to_string(),
                "5.1.1".to_string(),
                "5.1".to_string(),
                "5.0.5".to_string(),
                "5.0.4".to_string(),
                "5.0.3".to_string(),
                "5.0.2".to_string(),
                "5.0.1".to_string(),
                "5.0".to_string(),
            ],
            latest_user_facing_version: "5.3".to_string(),
            latest_update_version: None,
            newest_compatible_machine: None,
        },
    }
}

/// iTunes variants share everything except the accepted version.
///
/// Patching iTunes rewrites neither the bundle identifier nor the version
/// strings, so there is no reliable on-disk patched marker; the patched
/// bundle id is a sentinel that never matches and the version marker is
/// absent. A patched install simply classifies as compatible again.
fn itunes_target(id: TargetId, version: &str) -> AppTarget {
    AppTarget {
        id,
        name: id.display_name().to_string(),
        existing_bundle_id: "com.launcher.iTunes".to_string(),
        patched_bundle_id: "com.apple.intentionally-left-unused".to_string(),
        patched_version_marker: None,
        compatible_versions: vec![version.to_string()],
        latest_user_facing_version: version.to_string(),
        latest_update_version: Some("12.9.5".to_string()),
        newest_compatible_machine: None,
    }
}
