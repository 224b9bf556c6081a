//! Object-reference ("Key") sub-record decoder.
//!
//! Keys name simulation objects and appear inside nearly every message
//! family, so the sub-record is decoded in exactly one place. The wire
//! shape is flag-dependent: a contents byte announces optional clone ids
//! and an optional load mask.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

const HAS_CLONE_IDS: u8 = 0x01;
const HAS_LOAD_MASK: u8 = 0x02;

/// Decode one key sub-record into a branch node named `label`.
pub fn decode_key(
    label: impl Into<String>,
    buffer: &mut ChunkBuffer,
) -> Result<Node, ChunkError> {
    let mut node = Node::branch(label);

    let contents = buffer.read_u8()?;
    let sequence = buffer.read_u32()?;
    let flags = buffer.read_u16()?;
    node.push(Node::leaf(format!(
        "Location: 0x{sequence:08X} (flags 0x{flags:04X})"
    )));
    if contents & HAS_LOAD_MASK != 0 {
        node.push(Node::leaf(format!("Load Mask: 0x{:02X}", buffer.read_u8()?)));
    }
    node.push(Node::leaf(format!("Class Type: 0x{:04X}", buffer.read_u16()?)));
    node.push(Node::leaf(format!("Object ID: {}", buffer.read_u32()?)));
    node.push(Node::leaf(format!("Name: {}", buffer.read_safe_string()?)));
    if contents & HAS_CLONE_IDS != 0 {
        let clone_id = buffer.read_u16()?;
        buffer.skip(2)?; // unused on the wire
        let clone_player = buffer.read_u32()?;
        node.push(Node::leaf(format!("Clone ID: {clone_id}")));
        node.push(Node::leaf(format!("Clone Player: {clone_player}")));
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::decode_key;
    use crate::chunk::{ChunkBuffer, ChunkError};
    use crate::gamemsg::testutil::key_bytes;

    #[test]
    fn minimal_key_consumes_exact_bytes() {
        let data = key_bytes("Ferry Terminal");
        let mut buffer = ChunkBuffer::new(&data);

        let node = decode_key("Hitter", &mut buffer).unwrap();
        assert_eq!(node.label, "Hitter");
        assert_eq!(node.children.len(), 4);
        assert_eq!(node.children[0].label, "Location: 0x00000021 (flags 0x0000)");
        assert_eq!(node.children[1].label, "Class Type: 0x0001");
        assert_eq!(node.children[2].label, "Object ID: 42");
        assert_eq!(node.children[3].label, "Name: Ferry Terminal");
        assert!(buffer.is_exhausted());
    }

    #[test]
    fn key_with_clone_ids_and_load_mask() {
        let mut data = vec![0x03]; // clone ids + load mask
        data.extend_from_slice(&0x0000_0001u32.to_le_bytes());
        data.extend_from_slice(&0x0001u16.to_le_bytes());
        data.push(0xFF); // load mask
        data.extend_from_slice(&0x00F1u16.to_le_bytes());
        data.extend_from_slice(&7u32.to_le_bytes());
        data.extend_from_slice(&6u16.to_le_bytes());
        data.extend_from_slice(b"Avatar");
        data.extend_from_slice(&3u16.to_le_bytes()); // clone id
        data.extend_from_slice(&0u16.to_le_bytes()); // unused
        data.extend_from_slice(&1234u32.to_le_bytes()); // clone player
        let mut buffer = ChunkBuffer::new(&data);

        let node = decode_key("Clone", &mut buffer).unwrap();
        assert_eq!(node.children.len(), 7);
        assert_eq!(node.children[1].label, "Load Mask: 0xFF");
        assert_eq!(node.children[5].label, "Clone ID: 3");
        assert_eq!(node.children[6].label, "Clone Player: 1234");
        assert!(buffer.is_exhausted());
    }

    #[test]
    fn truncated_key_reports_error() {
        let data = key_bytes("Ferry Terminal");
        let mut buffer = ChunkBuffer::new(&data[..data.len() - 4]);

        let err = decode_key("Hitter", &mut buffer).unwrap_err();
        assert!(matches!(err, ChunkError::Truncated { .. }));
    }
}
