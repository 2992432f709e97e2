//! Core domain models for repatch
//!
//! This module contains the fundamental types used throughout the application:
//! - Application target identity and compatibility data
//! - Discovered installation records produced by a scan
//! - Classification outcomes of eligibility resolution
//! - Workflow stages and their message parameters

mod installation;
mod outcome;
mod stage;
mod target;

pub use installation::DiscoveredInstallation;
pub use outcome::ClassificationOutcome;
pub use stage::{GuidanceParams, GuidanceReason, UpdateOfferParams, WorkflowStage};
pub use target::{AppTarget, TargetId};
