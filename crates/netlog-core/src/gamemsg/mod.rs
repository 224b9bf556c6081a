//! Game-message field decoders.
//!
//! Each family follows the same shape: a fixed field schema keyed by the
//! leading type code, one node per scalar field, and delegation to
//! [`key::decode_key`] for object references. Adding a family means one
//! schema function and one `register` call; dispatch never changes.
//!
//! Every family starts with the common message header decoded by
//! [`decode_message_base`].

pub mod clone;
pub mod event;
pub mod key;
pub mod link;
pub mod notify;
pub mod server;

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::registry::{Decoder, Registry};
use crate::tree::Node;

use self::key::decode_key;

/// Wire class codes for the built-in families.
pub const NOTIFY_MSG: u16 = 0x02ED;
pub const LOAD_CLONE_MSG: u16 = 0x0253;
pub const SERVER_REPLY_MSG: u16 = 0x026F;
pub const LINK_EFFECTS_TRIGGER_MSG: u16 = 0x0300;

/// Registry pre-loaded with every built-in message family.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(
        NOTIFY_MSG,
        Decoder {
            name: "NotifyMsg",
            decode: notify::decode,
        },
    );
    registry.register(
        LOAD_CLONE_MSG,
        Decoder {
            name: "LoadCloneMsg",
            decode: clone::decode,
        },
    );
    registry.register(
        SERVER_REPLY_MSG,
        Decoder {
            name: "ServerReplyMsg",
            decode: server::decode,
        },
    );
    registry.register(
        LINK_EFFECTS_TRIGGER_MSG,
        Decoder {
            name: "LinkEffectsTriggerMsg",
            decode: link::decode,
        },
    );
    registry
}

pub(crate) fn bool_name(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Common message header carried by every game message: sender key,
/// receiver key list, timestamp, and broadcast flags.
///
/// Receivers decoded before a truncation failure stay attached, so a
/// partially parsed header keeps what did read.
pub fn decode_message_base(
    buffer: &mut ChunkBuffer,
    out: &mut Vec<Node>,
) -> Result<(), ChunkError> {
    out.push(decode_key("Sender", buffer)?);

    let count = buffer.read_u32()?;
    let mut receivers = Node::branch(format!("Receivers: {count}"));
    let mut result = Ok(());
    for index in 0..count {
        match decode_key(format!("Receiver {index}"), buffer) {
            Ok(node) => receivers.push(node),
            Err(err) => {
                result = Err(err);
                break;
            }
        }
    }
    out.push(receivers);
    result?;

    out.push(Node::leaf(format!("Timestamp: {}", buffer.read_f64()?)));
    out.push(Node::leaf(format!(
        "Cast Flags: 0x{:08X}",
        buffer.read_u32()?
    )));
    Ok(())
}

#[cfg(test)]
pub(crate) mod testutil {
    /// Minimal key sub-record: no clone ids, no load mask.
    pub(crate) fn key_bytes(name: &str) -> Vec<u8> {
        let mut data = vec![0x00]; // contents
        data.extend_from_slice(&0x0000_0021u32.to_le_bytes()); // sequence
        data.extend_from_slice(&0x0000u16.to_le_bytes()); // location flags
        data.extend_from_slice(&0x0001u16.to_le_bytes()); // class type
        data.extend_from_slice(&42u32.to_le_bytes()); // object id
        data.extend_from_slice(&(name.len() as u16).to_le_bytes());
        data.extend_from_slice(name.as_bytes());
        data
    }

    /// Header with no receivers, zero timestamp, zero flags.
    pub(crate) fn message_base_bytes() -> Vec<u8> {
        let mut data = key_bytes("Sender");
        data.extend_from_slice(&0u32.to_le_bytes()); // receiver count
        data.extend_from_slice(&0f64.to_le_bytes()); // timestamp
        data.extend_from_slice(&0u32.to_le_bytes()); // cast flags
        data
    }

    /// Node count `decode_message_base` emits for `message_base_bytes`.
    pub(crate) const MESSAGE_BASE_NODES: usize = 4;
}
