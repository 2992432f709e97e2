//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable classification display with colors
//! - Actionable next-step line per workflow stage
//! - Warning display for non-fatal errors and machine compatibility

use crate::domain::{ClassificationOutcome, GuidanceReason, WorkflowStage};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use chrono::Utc;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn green(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    /// One-line classification summary
    fn outcome_line(&self, result: &OrchestratorResult) -> String {
        let name = &result.target.name;
        match &result.outcome {
            ClassificationOutcome::AlreadyPatched { path } => format!(
                "{} at {} is {}",
                name,
                path.display(),
                self.green("already patched")
            ),
            ClassificationOutcome::CompatibleUnpatched {
                path,
                short_version,
                ..
            } => format!(
                "{} {} at {} is {}",
                name,
                short_version,
                path.display(),
                self.green("compatible and ready to patch")
            ),
            ClassificationOutcome::CompatibleOutdatedBuild {
                path,
                short_version,
            } => format!(
                "{} {} at {} is {}",
                name,
                short_version,
                path.display(),
                self.yellow("compatible, but a newer build is available")
            ),
            ClassificationOutcome::IncompatibleTooOld {
                short_version,
                only_needs_minor_update,
            } => {
                if *only_needs_minor_update {
                    format!(
                        "{} {} {}",
                        name,
                        short_version,
                        self.yellow("needs a minor update before it can be patched")
                    )
                } else {
                    format!(
                        "{} {} is {}",
                        name,
                        short_version,
                        self.red("too old to patch")
                    )
                }
            }
            ClassificationOutcome::IncompatibleTooNew { short_version } => format!(
                "{} {} is {}",
                name,
                short_version,
                self.red("too new to patch")
            ),
            ClassificationOutcome::NotInstalled => {
                format!("{} {}", name, self.red("was not found"))
            }
        }
    }

    /// Next-step line derived from the selected stage
    fn stage_line(&self, result: &OrchestratorResult) -> Option<String> {
        match &result.stage {
            WorkflowStage::ProceedToAuthenticate { .. } => {
                Some("Next step: authenticate and apply the patch.".to_string())
            }
            WorkflowStage::ShowCompletion { .. } => None,
            WorkflowStage::OfferOptionalUpdate { params } => {
                let recommended = match &params.recommended_build {
                    Some(build) => {
                        format!("{} (build {})", params.recommended_version, build)
                    }
                    None => params.recommended_version.clone(),
                };
                Some(format!(
                    "Consider updating {} from {} to {} before patching.",
                    params.target_name, params.installed_version, recommended
                ))
            }
            WorkflowStage::ShowGuidance { params } => {
                let wanted = match &params.compatible_build {
                    Some(build) => {
                        format!("{} (build {})", params.compatible_version, build)
                    }
                    None => params.compatible_version.clone(),
                };
                let line = match &params.reason {
                    GuidanceReason::TooOld {
                        only_needs_minor_update: true,
                    } => format!("Update {} to {} and run the check again.", params.target_name, wanted),
                    GuidanceReason::TooOld { .. } => format!(
                        "Install {} {} to proceed; this copy cannot be updated in place.",
                        params.target_name, wanted
                    ),
                    GuidanceReason::TooNew => format!(
                        "Only {} {} can be patched; this copy is newer.",
                        params.target_name, wanted
                    ),
                    GuidanceReason::NotInstalled => format!(
                        "Install {} {}, or pass --locate <path> if it lives outside the search root.",
                        params.target_name, wanted
                    ),
                };
                Some(line)
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", self.outcome_line(result))?;

        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if let Some(line) = self.stage_line(result) {
            writeln!(writer, "{}", line)?;
        }

        if result.machine_too_new {
            writeln!(
                writer,
                "{}",
                self.yellow("Warning: this machine is newer than the newest model the patch supports.")
            )?;
        }

        for error in &result.errors {
            writeln!(writer, "{}", self.yellow(&format!("Warning: {}", error)))?;
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer)?;
            writeln!(writer, "Target: {} ({})", result.target.name, result.target.id)?;
            writeln!(
                writer,
                "Compatible versions: {}",
                result.target.compatible_versions.join(", ")
            )?;
            if let Some(update) = &result.target.latest_update_version {
                writeln!(writer, "Latest in-place update: {}", update)?;
            }
            writeln!(writer, "Selected stage: {}", result.stage)?;
            writeln!(
                writer,
                "Checked at: {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }

        Ok(())
    }
}
