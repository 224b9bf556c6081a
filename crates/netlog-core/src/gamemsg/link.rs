//! `LinkEffectsTriggerMsg` family: avatar link-in/link-out effects.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

use super::{bool_name, decode_message_base};
use super::key::decode_key;

pub fn decode(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
    decode_message_base(buffer, out)?;

    out.push(Node::leaf(format!("Invis Level: {}", buffer.read_u32()?)));
    out.push(Node::leaf(format!(
        "Leaving: {}",
        bool_name(buffer.read_bool()?)
    )));
    out.push(decode_key("Linkee", buffer)?);
    out.push(Node::leaf(format!("Effects: {}", buffer.read_u32()?)));
    out.push(decode_key("Link-In Animation", buffer)?);
    Ok(())
}
