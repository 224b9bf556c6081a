mod log;

pub use log::LogFileSource;

use thiserror::Error;

/// One framed message record pulled from a capture log.
#[derive(Debug, Clone)]
pub struct RecordEvent {
    /// Capture time in unix milliseconds, when the log recorded one.
    pub ts_ms: Option<u64>,
    /// Top-level message type code.
    pub type_code: u16,
    /// Message payload, excluding all framing.
    pub data: Vec<u8>,
}

/// Supplier of message boundaries. The dissector itself never frames;
/// it decodes whatever one record hands it.
pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<RecordEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed log ({context}): {message}")]
    Malformed {
        context: &'static str,
        message: String,
    },
}
