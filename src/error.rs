//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CatalogError: Issues with the compatibility catalog and remote refresh
//! - ScanError: Issues with installation scanning and bundle metadata
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Compatibility catalog related errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Installation scan related errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the compatibility catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Remote catalog document could not be fetched
    #[error("failed to fetch catalog from {url}: {message}")]
    FetchError { url: String, message: String },

    /// Remote catalog document is structurally invalid
    #[error("malformed catalog document: {message}")]
    MalformedDocument { message: String },

    /// Remote catalog document has no entry for the chosen target
    #[error("catalog document has no entry for target '{target}'")]
    MissingTarget { target: String },

    /// A target entry declares no compatible versions
    #[error("target '{target}' declares an empty compatible version list")]
    EmptyCompatibleList { target: String },

    /// Request timed out
    #[error("timeout while fetching catalog from {url}")]
    Timeout { url: String },
}

/// Errors related to installation scanning and bundle metadata
#[derive(Error, Debug)]
pub enum ScanError {
    /// Search scope does not exist or is not a directory
    #[error("search scope is not a directory: {path}")]
    InvalidScope { path: PathBuf },

    /// Bundle metadata file could not be read
    #[error("failed to read bundle metadata at {path}: {message}")]
    InfoUnreadable { path: PathBuf, message: String },

    /// Bundle metadata file could not be parsed
    #[error("failed to parse bundle metadata at {path}: {message}")]
    InfoMalformed { path: PathBuf, message: String },

    /// Filesystem enumeration failed
    #[error("failed to enumerate {path}: {source}")]
    EnumerationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown application target name
    #[error("unknown application target '{value}'")]
    UnknownTarget { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl CatalogError {
    /// Creates a new FetchError
    pub fn fetch_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::FetchError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new MalformedDocument error
    pub fn malformed(message: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            message: message.into(),
        }
    }

    /// Creates a new MissingTarget error
    pub fn missing_target(target: impl Into<String>) -> Self {
        CatalogError::MissingTarget {
            target: target.into(),
        }
    }

    /// Creates a new EmptyCompatibleList error
    pub fn empty_compatible_list(target: impl Into<String>) -> Self {
        CatalogError::EmptyCompatibleList {
            target: target.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        CatalogError::Timeout { url: url.into() }
    }
}

impl ScanError {
    /// Creates a new InvalidScope error
    pub fn invalid_scope(path: impl Into<PathBuf>) -> Self {
        ScanError::InvalidScope { path: path.into() }
    }

    /// Creates a new InfoUnreadable error
    pub fn info_unreadable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScanError::InfoUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InfoMalformed error
    pub fn info_malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScanError::InfoMalformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new EnumerationFailed error
    pub fn enumeration_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::EnumerationFailed {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    /// Creates a new UnknownTarget error
    pub fn unknown_target(value: impl Into<String>) -> Self {
        ConfigError::UnknownTarget {
            value: value.into(),
        }
    }

    /// Creates a new ConflictingOptions error
    pub fn conflicting_options(message: impl Into<String>) -> Self {
        ConfigError::ConflictingOptions {
            message: message.into(),
        }
    }
}
