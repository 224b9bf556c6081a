//! Log inspection: drive the registry over every record in a capture log
//! and assemble a deterministic report.

use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::chunk::ChunkBuffer;
use crate::gamemsg::default_registry;
use crate::registry::Registry;
use crate::source::{LogFileSource, RecordEvent, RecordSource, SourceError};
use crate::tree::Node;
use crate::{LogMessage, LogReport, make_empty_report};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Inspect a capture log with the built-in message families.
pub fn inspect_log_file(path: &Path) -> Result<LogReport, InspectError> {
    let source = LogFileSource::open(path)?;
    let bytes = path.metadata()?.len();
    inspect_source(
        &path.display().to_string(),
        bytes,
        source,
        &default_registry(),
    )
}

/// Inspect records from any source with any registry.
///
/// Each record is an independent unit of failure: a message that cannot
/// be decoded yields an anomalous tree and the loop moves on.
pub fn inspect_source<S: RecordSource>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
    registry: &Registry,
) -> Result<LogReport, InspectError> {
    let mut report = make_empty_report(input_path, input_bytes);

    while let Some(RecordEvent {
        ts_ms,
        type_code,
        data,
    }) = source.next_record()?
    {
        report.messages_total += 1;
        let mut buffer = ChunkBuffer::new(&data);
        let mut tree = registry.dissect(type_code, &mut buffer);
        if !tree.anomalous && !buffer.is_exhausted() {
            // The family decoder returned without consuming the payload:
            // the record and the schema disagree about the shape.
            tree.push(Node::anomaly(format!(
                "Trailing bytes: {}",
                buffer.remaining()
            )));
            tree.anomalous = true;
        }
        report.messages.push(LogMessage {
            ts: ts_ms.and_then(ts_to_rfc3339),
            type_code,
            tree,
        });
    }

    Ok(report)
}

fn ts_to_rfc3339(ts_ms: u64) -> Option<String> {
    let nanos = i128::from(ts_ms) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|ts| ts.format(&Rfc3339).ok())
}
