//! `ServerReplyMsg` family: the server's answer to a lock request.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

use super::decode_message_base;

pub fn decode(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
    decode_message_base(buffer, out)?;

    let reply = buffer.read_i32()?;
    // A value outside the known set is still just a value, not a dispatch
    // tag, so it renders plainly rather than anomalously.
    let label = match reply {
        -1 => "Type: Invalid".to_string(),
        0 => "Type: Deny".to_string(),
        1 => "Type: Affirm".to_string(),
        other => format!("Type: {other}"),
    };
    out.push(Node::leaf(label));
    Ok(())
}
