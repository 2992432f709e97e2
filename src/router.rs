//! Workflow routing
//!
//! Pure mapping from a classification outcome to the next workflow stage.
//! Presentation is performed by the caller; routing only selects the stage
//! and fills in its message parameters.

use crate::domain::{
    AppTarget, ClassificationOutcome, GuidanceParams, GuidanceReason, UpdateOfferParams,
    WorkflowStage,
};

/// Map a classification outcome to the next workflow stage.
///
/// Deterministic and side-effect free: identical outcomes always route to
/// identical stages with identical parameters.
pub fn route(outcome: &ClassificationOutcome, target: &AppTarget) -> WorkflowStage {
    match outcome {
        ClassificationOutcome::AlreadyPatched { path } => WorkflowStage::ShowCompletion {
            path: path.clone(),
        },
        ClassificationOutcome::CompatibleUnpatched { path, .. } => {
            WorkflowStage::ProceedToAuthenticate { path: path.clone() }
        }
        ClassificationOutcome::CompatibleOutdatedBuild { short_version, .. } => {
            WorkflowStage::OfferOptionalUpdate {
                params: UpdateOfferParams {
                    target_name: target.name.clone(),
                    installed_version: short_version.clone(),
                    recommended_version: target.latest_user_facing_version.clone(),
                    recommended_build: distinct_compatible_build(target),
                },
            }
        }
        ClassificationOutcome::IncompatibleTooOld {
            short_version,
            only_needs_minor_update,
        } => WorkflowStage::ShowGuidance {
            params: guidance_params(
                target,
                GuidanceReason::TooOld {
                    only_needs_minor_update: *only_needs_minor_update,
                },
                Some(short_version.clone()),
            ),
        },
        ClassificationOutcome::IncompatibleTooNew { short_version } => WorkflowStage::ShowGuidance {
            params: guidance_params(target, GuidanceReason::TooNew, Some(short_version.clone())),
        },
        ClassificationOutcome::NotInstalled => WorkflowStage::ShowGuidance {
            params: guidance_params(target, GuidanceReason::NotInstalled, None),
        },
    }
}

/// The canonical compatible build, only when it is not already the
/// user-facing version, e.g. Logic Pro 9's 1700.67 build of 9.1.8.
fn distinct_compatible_build(target: &AppTarget) -> Option<String> {
    target
        .latest_compatible()
        .filter(|latest| *latest != target.latest_user_facing_version)
        .map(str::to_string)
}

fn guidance_params(
    target: &AppTarget,
    reason: GuidanceReason,
    found_version: Option<String>,
) -> GuidanceParams {
    GuidanceParams {
        target_name: target.name.clone(),
        reason,
        found_version,
        compatible_version: target.latest_user_facing_version.clone(),
        compatible_build: distinct_compatible_build(target),
    }
}
