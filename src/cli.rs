//! CLI argument parsing module for repatch

use crate::domain::TargetId;
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Patch eligibility checker for legacy macOS applications
#[derive(Parser, Debug, Clone)]
#[command(
    name = "repatch",
    version,
    about = "Patch eligibility checker for legacy macOS applications"
)]
pub struct CliArgs {
    /// Directory to search for application bundles
    #[arg(default_value = "/Applications")]
    pub search_root: PathBuf,

    /// Application target to check (e.g. aperture, itunes-classic)
    #[arg(long, required_unless_present = "list_apps")]
    pub app: Option<String>,

    /// Validate a manually located bundle instead of scanning
    #[arg(long)]
    pub locate: Option<PathBuf>,

    /// Refresh compatibility data from this URL before resolving
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Host machine model identifier (e.g. MacPro6,1)
    #[arg(long)]
    pub machine_model: Option<String>,

    /// List supported application targets and exit
    #[arg(long)]
    pub list_apps: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Validate option combinations not expressible in clap attributes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verbose && self.quiet {
            return Err(ConfigError::conflicting_options(
                "--verbose and --quiet cannot be combined",
            ));
        }
        Ok(())
    }

    /// Resolve the chosen application target
    pub fn target(&self) -> Result<TargetId, ConfigError> {
        let key = self.app.as_deref().unwrap_or_default();
        TargetId::from_key(key).ok_or_else(|| ConfigError::unknown_target(key))
    }
}
