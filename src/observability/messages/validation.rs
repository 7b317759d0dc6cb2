// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration and asset graph validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Validation of the asset graph started.
///
/// # Log Level
/// `debug!` - Routine
pub struct ValidationStarted {
    pub asset_count: usize,
    pub check_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating {} assets and {} checks",
            self.asset_count, self.check_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::debug!(
            asset_count = self.asset_count,
            check_count = self.check_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "validation",
            span_name = name,
            asset_count = self.asset_count,
            check_count = self.check_count,
        )
    }
}

/// Validation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationCompleted {
    pub asset_count: usize,
    pub selected_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.selected_count < self.asset_count {
            write!(
                f,
                "Configuration is valid: {} of {} assets selected",
                self.selected_count, self.asset_count
            )
        } else {
            write!(f, "Configuration is valid: {} assets", self.asset_count)
        }
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            asset_count = self.asset_count,
            selected_count = self.selected_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "validation_completed",
            span_name = name,
            asset_count = self.asset_count,
            selected_count = self.selected_count,
        )
    }
}

/// Validation failed; each error is logged separately.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use energy_analysis::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed { error_count: 3 };
/// assert_eq!(msg.to_string(), "Configuration validation failed with 3 errors");
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} errors",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(
            error_count = self.error_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation_failed",
            span_name = name,
            error_count = self.error_count,
        )
    }
}

/// A single validation problem.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationProblem<'a> {
    pub error: &'a crate::errors::ValidationError,
}

impl Display for ValidationProblem<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation error: {}", self.error)
    }
}

impl StructuredLog for ValidationProblem<'_> {
    fn log(&self) {
        tracing::error!(
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "validation_problem",
            span_name = name,
            error = %self.error,
        )
    }
}
