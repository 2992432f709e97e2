//! Remote catalog refresh
//!
//! This module provides:
//! - RemoteCatalogClient: JSON document fetch with retry and backoff
//! - apply_remote_document: derive an updated target from a parsed
//!   document, rejecting the refresh wholesale on any malformed field

use crate::domain::AppTarget;
use crate::error::CatalogError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default timeout for catalog requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("repatch/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client for fetching the remote catalog document
#[derive(Clone)]
pub struct RemoteCatalogClient {
    client: Client,
    max_retries: u32,
}

impl RemoteCatalogClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                CatalogError::fetch_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Fetch and parse the catalog document with retry logic
    pub async fn fetch_document(&self, url: &str) -> Result<Value, CatalogError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(CatalogError::fetch_error(
                            url,
                            format!("HTTP {}", response.status()),
                        ));
                    }
                    match response.json::<Value>().await {
                        Ok(doc) => return Ok(doc),
                        Err(e) => {
                            last_error = Some(CatalogError::malformed(format!(
                                "failed to parse JSON: {}",
                                e
                            )));
                        }
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(CatalogError::timeout(url));
                    } else {
                        last_error = Some(CatalogError::fetch_error(url, e.to_string()));
                    }
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error
            .unwrap_or_else(|| CatalogError::fetch_error(url, "unknown error".to_string())))
    }
}

/// Derive an updated target from a parsed remote catalog document.
///
/// The document shape is `{"targets": {"<key>": {...}}}` where each entry
/// may override `compatible_versions`, `latest_user_facing_version`,
/// `patched_version_marker`, `latest_update_version` and
/// `newest_compatible_machine`. Every present field is validated before
/// anything is applied; a single malformed field rejects the whole refresh
/// and the previous catalog stays in effect.
pub fn apply_remote_document(target: &AppTarget, doc: &Value) -> Result<AppTarget, CatalogError> {
    let targets = doc
        .get("targets")
        .ok_or_else(|| CatalogError::malformed("missing 'targets' object"))?
        .as_object()
        .ok_or_else(|| CatalogError::malformed("'targets' is not an object"))?;

    let entry = targets
        .get(target.id.key())
        .ok_or_else(|| CatalogError::missing_target(target.id.key()))?
        .as_object()
        .ok_or_else(|| {
            CatalogError::malformed(format!("entry for '{}' is not an object", target.id.key()))
        })?;

    // Validate every field up front; nothing is applied on failure.
    let compatible_versions = match entry.get("compatible_versions") {
        Some(value) => Some(parse_string_list(value, "compatible_versions")?),
        None => None,
    };
    if let Some(list) = &compatible_versions {
        if list.is_empty() {
            return Err(CatalogError::empty_compatible_list(target.id.key()));
        }
    }
    let latest_user_facing_version =
        parse_optional_string(entry.get("latest_user_facing_version"), "latest_user_facing_version")?;
    let patched_version_marker =
        parse_nullable_string(entry.get("patched_version_marker"), "patched_version_marker")?;
    let latest_update_version =
        parse_nullable_string(entry.get("latest_update_version"), "latest_update_version")?;
    let newest_compatible_machine = parse_nullable_string(
        entry.get("newest_compatible_machine"),
        "newest_compatible_machine",
    )?;

    let mut updated = target.clone();
    if let Some(list) = compatible_versions {
        updated.compatible_versions = list;
    }
    if let Some(v) = latest_user_facing_version {
        updated.latest_user_facing_version = v;
    }
    if let Some(v) = patched_version_marker {
        updated.patched_version_marker = v;
    }
    if let Some(v) = latest_update_version {
        updated.latest_update_version = v;
    }
    if let Some(v) = newest_compatible_machine {
        updated.newest_compatible_machine = v;
    }
    Ok(updated)
}

fn parse_string_list(value: &Value, field: &str) -> Result<Vec<String>, CatalogError> {
    let array = value
        .as_array()
        .ok_or_else(|| CatalogError::malformed(format!("'{}' is not an array", field)))?;
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| CatalogError::malformed(format!("'{}' contains a non-string", field)))
        })
        .collect()
}

/// Absent field means "no override"; present field must be a string.
fn parse_optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>, CatalogError> {
    match value {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| CatalogError::malformed(format!("'{}' is not a string", field))),
    }
}

/// Absent means "no override"; JSON null means "clear the value".
fn parse_nullable_string(
    value: Option<&Value>,
    field: &str,
) -> Result<Option<Option<String>>, CatalogError> {
    match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(v) => v
            .as_str()
            .map(|s| Some(Some(s.to_string())))
            .ok_or_else(|| CatalogError::malformed(format!("'{}' is not a string", field))),
    }
}
