//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the classification outcome and selected stage
//! - Optional catalog detail in verbose mode

use crate::domain::{ClassificationOutcome, WorkflowStage};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Target key as accepted by --app
    target: String,
    /// Application display name
    app_name: &'a str,
    /// Classification outcome
    outcome: &'a ClassificationOutcome,
    /// Selected workflow stage
    stage: &'a WorkflowStage,
    /// Whether the host machine is too new for the patch
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    machine_too_new: bool,
    /// Non-fatal errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    /// Catalog detail (verbose mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<JsonCatalog<'a>>,
}

/// JSON representation of the catalog data used for the check
#[derive(Serialize)]
struct JsonCatalog<'a> {
    compatible_versions: &'a [String],
    latest_user_facing_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_update_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    newest_compatible_machine: Option<&'a str>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let catalog = match self.verbosity {
            Verbosity::Verbose => Some(JsonCatalog {
                compatible_versions: &result.target.compatible_versions,
                latest_user_facing_version: &result.target.latest_user_facing_version,
                latest_update_version: result.target.latest_update_version.as_deref(),
                newest_compatible_machine: result.target.newest_compatible_machine.as_deref(),
            }),
            _ => None,
        };

        let output = JsonOutput {
            target: result.target.id.key().to_string(),
            app_name: &result.target.name,
            outcome: &result.outcome,
            stage: &result.stage,
            machine_too_new: result.machine_too_new,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
            catalog,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
