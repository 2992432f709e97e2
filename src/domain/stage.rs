//! Workflow stages and their message parameters
//!
//! A stage tells the surrounding application what to present next. Stages
//! carry named parameters only; formatting and localization belong to the
//! presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why guidance is being shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuidanceReason {
    /// The installed version predates the patchable range
    TooOld {
        /// True when an in-place minor update would make it compatible
        only_needs_minor_update: bool,
    },
    /// The installed version postdates the patchable range
    TooNew,
    /// No install was found
    NotInstalled,
}

/// Parameters for rendering a guidance message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceParams {
    /// Application display name
    pub target_name: String,
    /// Why guidance is needed
    pub reason: GuidanceReason,
    /// The version found on disk, when one was found
    pub found_version: Option<String>,
    /// User-facing compatible version for messaging
    pub compatible_version: String,
    /// Canonical compatible build number, when it differs from the
    /// user-facing version
    pub compatible_build: Option<String>,
}

/// Parameters for offering an optional update before patching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOfferParams {
    /// Application display name
    pub target_name: String,
    /// Short version currently installed
    pub installed_version: String,
    /// Version the update would install
    pub recommended_version: String,
    /// Canonical recommended build number, when it differs from the
    /// user-facing version. Distinguishes the offer when an outdated
    /// build shares its short version with the recommendation.
    pub recommended_build: Option<String>,
}

/// Next workflow stage selected for a classification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Proceed to authentication and patching
    ProceedToAuthenticate {
        /// Bundle to patch
        path: PathBuf,
    },
    /// Show guidance explaining why patching cannot proceed
    ShowGuidance {
        /// Message parameters
        params: GuidanceParams,
    },
    /// Offer an optional update before patching
    OfferOptionalUpdate {
        /// Message parameters
        params: UpdateOfferParams,
    },
    /// The install is already patched; show completion
    ShowCompletion {
        /// Patched bundle location
        path: PathBuf,
    },
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStage::ProceedToAuthenticate { path } => {
                write!(f, "proceed to authenticate ({})", path.display())
            }
            WorkflowStage::ShowGuidance { params } => {
                write!(f, "show guidance for {}", params.target_name)
            }
            WorkflowStage::OfferOptionalUpdate { params } => write!(
                f,
                "offer optional update of {} to {}",
                params.target_name, params.recommended_version
            ),
            WorkflowStage::ShowCompletion { path } => {
                write!(f, "show completion ({})", path.display())
            }
        }
    }
}
