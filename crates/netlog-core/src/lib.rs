//! Core dissection engine for captured game-network messages.
//!
//! This crate implements the offline pipeline used by the CLI and by any
//! tree-viewing front end: a record source frames messages out of a
//! capture log, the registry dispatches each payload to its family
//! decoder, and decoders emit an ordered tree of labeled nodes. Decoding
//! is byte-oriented and side-effect free; all I/O is isolated in the
//! `source` module.
//!
//! Invariants:
//! - Child-node order always matches wire order.
//! - A failed read never advances the buffer cursor.
//! - Unknown type codes stop decoding for that message; nothing is
//!   skipped speculatively, because the format carries no length field.
//! - Every tree root is flagged when any descendant is anomalous.
//! - Reports are deterministic: the same log yields the same JSON.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use netlog_core::inspect_log_file;
//!
//! let report = inspect_log_file(Path::new("capture.nlog"))?;
//! println!("messages: {}", report.messages_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod chunk;
pub mod gamemsg;
mod inspect;
mod registry;
mod source;
mod tree;

pub use chunk::{ChunkBuffer, ChunkError};
pub use gamemsg::default_registry;
pub use inspect::{InspectError, inspect_log_file, inspect_source};
pub use registry::{DecodeFn, Decoder, Registry};
pub use source::{LogFileSource, RecordEvent, RecordSource, SourceError};
pub use tree::Node;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used so reports stay byte-identical across runs.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Dissection report for one capture log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input log metadata.
    pub input: InputInfo,

    /// Number of records pulled from the log.
    pub messages_total: u64,
    /// One dissected tree per record, in log order.
    pub messages: Vec<LogMessage>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "netlog").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input log metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// One dissected message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    /// RFC3339 capture timestamp, when the log recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    /// Top-level message type code.
    pub type_code: u16,
    /// Dissection tree; `tree.anomalous` marks messages containing any
    /// unknown code or decode failure.
    pub tree: Node,
}

/// Build an empty report with base fields filled.
pub fn make_empty_report(input_path: &str, input_bytes: u64) -> LogReport {
    LogReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "netlog".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        messages_total: 0,
        messages: vec![],
    }
}
