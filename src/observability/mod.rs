// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the energy analysis pipeline.
//!
//! Every log line is built from a message struct in [`messages`]. Each struct
//! implements `Display` for the human-readable text and [`messages::StructuredLog`]
//! to emit the event with typed fields, so the same event reads well in a terminal
//! and stays queryable as JSON.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - executor lifecycle and level computation
//! * `messages::asset` - asset materialization, dataset loads and outputs
//! * `messages::check` - asset check results
//! * `messages::validation` - config and asset graph validation
//!
//! # Usage
//!
//! ```rust
//! use energy_analysis::observability::messages::asset::AssetMaterialized;
//! use energy_analysis::observability::messages::StructuredLog;
//! use std::time::Duration;
//!
//! AssetMaterialized {
//!     asset_id: "energy_breakdown",
//!     rows: 8_412,
//!     duration: Duration::from_millis(35),
//! }
//! .log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
