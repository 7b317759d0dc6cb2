// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for asset materialization and the files assets read and write.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// An asset started materializing.
///
/// # Log Level
/// `debug!` - Per-asset progress
pub struct AssetMaterializationStarted<'a> {
    pub asset_id: &'a str,
    pub input_count: usize,
}

impl Display for AssetMaterializationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Materializing asset '{}' from {} inputs",
            self.asset_id, self.input_count
        )
    }
}

impl StructuredLog for AssetMaterializationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            asset_id = self.asset_id,
            input_count = self.input_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "asset",
            span_name = name,
            asset_id = self.asset_id,
            input_count = self.input_count,
        )
    }
}

/// An asset materialized.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AssetMaterialized<'a> {
    pub asset_id: &'a str,
    pub rows: usize,
    pub duration: Duration,
}

impl Display for AssetMaterialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Asset '{}' materialized: {} rows in {:?}",
            self.asset_id, self.rows, self.duration
        )
    }
}

impl StructuredLog for AssetMaterialized<'_> {
    fn log(&self) {
        tracing::info!(
            asset_id = self.asset_id,
            rows = self.rows,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "asset_materialized",
            span_name = name,
            asset_id = self.asset_id,
            rows = self.rows,
        )
    }
}

/// An asset failed to materialize.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use energy_analysis::observability::messages::asset::AssetMaterializationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
/// let msg = AssetMaterializationFailed {
///     asset_id: "population",
///     error: &error,
/// };
///
/// assert_eq!(msg.to_string(), "Asset 'population' failed: no such file");
/// ```
pub struct AssetMaterializationFailed<'a> {
    pub asset_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for AssetMaterializationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Asset '{}' failed: {}", self.asset_id, self.error)
    }
}

impl StructuredLog for AssetMaterializationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            asset_id = self.asset_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "asset_failed",
            span_name = name,
            asset_id = self.asset_id,
            error = %self.error,
        )
    }
}

/// An asset was not run because something upstream did not produce a value.
///
/// # Log Level
/// `warn!` - Partial run
pub struct AssetSkipped<'a> {
    pub asset_id: &'a str,
    pub blocked_by: &'a str,
}

impl Display for AssetSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping asset '{}': upstream '{}' did not materialize",
            self.asset_id, self.blocked_by
        )
    }
}

impl StructuredLog for AssetSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            asset_id = self.asset_id,
            blocked_by = self.blocked_by,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "asset_skipped",
            span_name = name,
            asset_id = self.asset_id,
            blocked_by = self.blocked_by,
        )
    }
}

/// A source dataset was read from disk.
///
/// # Log Level
/// `debug!` - I/O detail
pub struct DatasetLoaded<'a> {
    pub path: &'a Path,
    pub rows: usize,
    pub duration: Duration,
}

impl Display for DatasetLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} rows from {} in {:?}",
            self.rows,
            self.path.display(),
            self.duration
        )
    }
}

impl StructuredLog for DatasetLoaded<'_> {
    fn log(&self) {
        tracing::debug!(
            path = %self.path.display(),
            rows = self.rows,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dataset_loaded",
            span_name = name,
            path = %self.path.display(),
            rows = self.rows,
        )
    }
}

/// The report sheets were written.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ReportWritten<'a> {
    pub directory: &'a Path,
    pub sheets: usize,
    pub latest_year: i32,
}

impl Display for ReportWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} report sheets to {} (latest year {})",
            self.sheets,
            self.directory.display(),
            self.latest_year
        )
    }
}

impl StructuredLog for ReportWritten<'_> {
    fn log(&self) {
        tracing::info!(
            directory = %self.directory.display(),
            sheets = self.sheets,
            latest_year = self.latest_year,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "report_written",
            span_name = name,
            directory = %self.directory.display(),
            sheets = self.sheets,
        )
    }
}

/// Materialized tables were persisted after a run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AssetsPersisted<'a> {
    pub directory: &'a Path,
    pub count: usize,
}

impl Display for AssetsPersisted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Persisted {} assets to {}",
            self.count,
            self.directory.display()
        )
    }
}

impl StructuredLog for AssetsPersisted<'_> {
    fn log(&self) {
        tracing::info!(
            directory = %self.directory.display(),
            count = self.count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "assets_persisted",
            span_name = name,
            directory = %self.directory.display(),
            count = self.count,
        )
    }
}
