//! `LoadCloneMsg` family: load or unload a cloned scene object.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

use super::{bool_name, decode_message_base};
use super::key::decode_key;

pub fn decode(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
    decode_message_base(buffer, out)?;

    out.push(decode_key("Clone", buffer)?);
    out.push(decode_key("Requestor", buffer)?);
    out.push(Node::leaf(format!("Origin Player: {}", buffer.read_u32()?)));
    out.push(Node::leaf(format!("User Data: {}", buffer.read_u32()?)));
    out.push(Node::leaf(format!(
        "Valid: {}",
        bool_name(buffer.read_bool()?)
    )));
    out.push(Node::leaf(format!(
        "Loading: {}",
        bool_name(buffer.read_bool()?)
    )));
    Ok(())
}
