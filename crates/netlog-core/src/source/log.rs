//! Capture-log file source.
//!
//! The log format is deliberately simple: a fixed file header followed by
//! length-framed records. All integers are little-endian.
//!
//! ```text
//! file header:  "NLOG"  u16 version
//! per record:   u64 unix-ms timestamp (0 = unknown)
//!               u16 message type code
//!               u32 payload length
//!               payload bytes
//! ```

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use super::{RecordEvent, RecordSource, SourceError};

pub(crate) const LOG_MAGIC: [u8; 4] = *b"NLOG";
pub(crate) const LOG_VERSION: u16 = 1;
const RECORD_HEADER_LEN: usize = 14;
/// Upper bound on a single payload; anything larger is framing damage.
const MAX_RECORD_LEN: u32 = 16 * 1024 * 1024;

#[derive(Debug)]
pub struct LogFileSource {
    reader: BufReader<File>,
}

impl LogFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header = [0u8; 6];
        reader.read_exact(&mut header)?;
        if header[..4] != LOG_MAGIC {
            return Err(SourceError::Malformed {
                context: "file header",
                message: "bad magic".to_string(),
            });
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != LOG_VERSION {
            return Err(SourceError::Malformed {
                context: "file header",
                message: format!("unsupported version {version}"),
            });
        }

        Ok(Self { reader })
    }
}

impl RecordSource for LogFileSource {
    fn next_record(&mut self) -> Result<Option<RecordEvent>, SourceError> {
        let mut header = [0u8; RECORD_HEADER_LEN];
        if !fill_or_eof(&mut self.reader, &mut header, "record header")? {
            return Ok(None);
        }

        let ts = u64::from_le_bytes([
            header[0], header[1], header[2], header[3], header[4], header[5], header[6], header[7],
        ]);
        let type_code = u16::from_le_bytes([header[8], header[9]]);
        let len = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
        if len > MAX_RECORD_LEN {
            return Err(SourceError::Malformed {
                context: "record length",
                message: format!("{len} bytes exceeds the {MAX_RECORD_LEN} byte limit"),
            });
        }

        let mut data = vec![0u8; len as usize];
        self.reader.read_exact(&mut data).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                SourceError::Malformed {
                    context: "record payload",
                    message: format!("expected {len} bytes"),
                }
            } else {
                SourceError::Io(err)
            }
        })?;

        Ok(Some(RecordEvent {
            ts_ms: if ts == 0 { None } else { Some(ts) },
            type_code,
            data,
        }))
    }
}

/// Fill `buf` completely, or report a clean end-of-file when zero bytes
/// were read. A partial fill is framing damage, not EOF.
fn fill_or_eof(
    reader: &mut impl Read,
    buf: &mut [u8],
    context: &'static str,
) -> Result<bool, SourceError> {
    let mut filled = 0;
    while filled < buf.len() {
        let count = reader.read(&mut buf[filled..])?;
        if count == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err(SourceError::Malformed {
                context,
                message: format!("truncated after {filled} bytes"),
            });
        }
        filled += count;
    }
    Ok(true)
}
