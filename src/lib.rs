//! repatch - Patch eligibility checker for legacy macOS applications
//!
//! This library provides the core functionality for deciding whether a
//! legacy application install can be patched to run on a modern system:
//! - Version comparison and normalization
//! - Installation scanning with stale-completion discard
//! - Compatibility catalog with built-in data and remote refresh
//! - Eligibility resolution and workflow routing

pub mod catalog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod router;
pub mod scanner;
pub mod version;
