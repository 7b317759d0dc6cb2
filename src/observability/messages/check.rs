// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for asset check results.

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A check passed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CheckPassed<'a> {
    pub check: &'a str,
    pub asset_id: &'a str,
    pub description: &'a str,
}

impl Display for CheckPassed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Check '{}' on '{}' passed: {}",
            self.check, self.asset_id, self.description
        )
    }
}

impl StructuredLog for CheckPassed<'_> {
    fn log(&self) {
        tracing::info!(
            check = self.check,
            asset_id = self.asset_id,
            passed = true,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "check",
            span_name = name,
            check = self.check,
            asset_id = self.asset_id,
        )
    }
}

/// A check failed.
///
/// # Log Level
/// `error!` when the check is blocking, `warn!` otherwise
///
/// # Example
/// ```
/// use energy_analysis::observability::messages::check::CheckFailed;
///
/// let msg = CheckFailed {
///     check: "per_capita_plausibility_check",
///     asset_id: "energy_breakdown_per_capita",
///     blocking: false,
///     description: "Per-capita bounds: 3 violations (max allowed: 0.1 GWh)",
/// };
///
/// assert!(msg.to_string().starts_with("Non-blocking check"));
/// ```
pub struct CheckFailed<'a> {
    pub check: &'a str,
    pub asset_id: &'a str,
    pub blocking: bool,
    pub description: &'a str,
}

impl Display for CheckFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let kind = if self.blocking { "Blocking" } else { "Non-blocking" };
        write!(
            f,
            "{} check '{}' on '{}' failed: {}",
            kind, self.check, self.asset_id, self.description
        )
    }
}

impl StructuredLog for CheckFailed<'_> {
    fn log(&self) {
        if self.blocking {
            tracing::error!(
                check = self.check,
                asset_id = self.asset_id,
                blocking = true,
                "{}", self
            );
        } else {
            tracing::warn!(
                check = self.check,
                asset_id = self.asset_id,
                blocking = false,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "check_failed",
            span_name = name,
            check = self.check,
            asset_id = self.asset_id,
            blocking = self.blocking,
        )
    }
}
