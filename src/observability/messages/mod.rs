// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Usage Pattern
//!
//! ```rust
//! use energy_analysis::observability::messages::engine::ExecutionStarted;
//!
//! let msg = ExecutionStarted {
//!     strategy: "work_queue",
//!     asset_count: 9,
//!     max_concurrency: 4,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod asset;
pub mod check;
pub mod engine;
pub mod validation;

use tracing::Span;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// A span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
