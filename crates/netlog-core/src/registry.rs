//! Message-type dispatch table.
//!
//! One registry maps wire type codes to family decoders. The same
//! lookup-or-report policy applies at every nesting level: on a miss
//! nothing further is read, because without a known schema the remaining
//! bytes cannot be interpreted (the format carries no payload length to
//! skip by).

use std::collections::HashMap;

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

/// Family decoder: reads its fixed field sequence from the buffer and
/// appends one node per field to `out`.
///
/// Nodes pushed before a truncation failure stay in `out`, so a partially
/// decoded message keeps the fields that did parse.
pub type DecodeFn = fn(&mut ChunkBuffer, &mut Vec<Node>) -> Result<(), ChunkError>;

/// A registered message family.
#[derive(Clone, Copy)]
pub struct Decoder {
    /// Family name used as the root node label.
    pub name: &'static str,
    pub decode: DecodeFn,
}

/// Registry of message-family decoders, built once at startup and only
/// read afterward.
#[derive(Default)]
pub struct Registry {
    decoders: HashMap<u16, Decoder>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family decoder for `code`. Replaces any previous entry, so a
    /// caller can override a built-in family without touching dispatch.
    pub fn register(&mut self, code: u16, decoder: Decoder) {
        self.decoders.insert(code, decoder);
    }

    pub fn name_for(&self, code: u16) -> Option<&'static str> {
        self.decoders.get(&code).map(|decoder| decoder.name)
    }

    /// Dissect one message body whose type is `code`.
    ///
    /// Always returns a root node: the family tree on a hit, a single
    /// anomalous `Unsupported message type` node on a miss (consuming
    /// nothing), and on a mid-decode truncation the fields read so far
    /// plus one anomalous error leaf. The root is flagged whenever any
    /// descendant is, so anomalies are visible without expanding.
    pub fn dissect(&self, code: u16, buffer: &mut ChunkBuffer) -> Node {
        let Some(decoder) = self.decoders.get(&code) else {
            return Node::anomaly(format!("Unsupported message type (0x{code:04X})"));
        };

        let mut root = Node::branch(decoder.name);
        if let Err(err) = (decoder.decode)(buffer, &mut root.children) {
            root.push(Node::anomaly(format!("Decode error: {err}")));
        }
        root.flag_anomalous_branches();
        root
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoder, Registry};
    use crate::chunk::{ChunkBuffer, ChunkError};
    use crate::tree::Node;

    fn decode_pair(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
        out.push(Node::leaf(format!("First: {}", buffer.read_u16()?)));
        out.push(Node::leaf(format!("Second: {}", buffer.read_u16()?)));
        Ok(())
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(
            0x0001,
            Decoder {
                name: "PairMsg",
                decode: decode_pair,
            },
        );
        registry
    }

    #[test]
    fn dispatch_hit_decodes_fields_in_order() {
        let data = [0x05, 0x00, 0x07, 0x00];
        let mut buffer = ChunkBuffer::new(&data);
        let root = registry().dissect(0x0001, &mut buffer);

        assert_eq!(root.label, "PairMsg");
        assert!(!root.anomalous);
        assert_eq!(root.children[0].label, "First: 5");
        assert_eq!(root.children[1].label, "Second: 7");
        assert!(buffer.is_exhausted());
    }

    #[test]
    fn dispatch_miss_consumes_nothing() {
        let data = [0xAA, 0xBB];
        let mut buffer = ChunkBuffer::new(&data);
        let root = registry().dissect(0x0063, &mut buffer);

        assert_eq!(root.label, "Unsupported message type (0x0063)");
        assert!(root.anomalous);
        assert!(root.children.is_empty());
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn truncation_keeps_decoded_prefix_and_flags_root() {
        let data = [0x05, 0x00, 0x07];
        let mut buffer = ChunkBuffer::new(&data);
        let root = registry().dissect(0x0001, &mut buffer);

        assert!(root.anomalous);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].label, "First: 5");
        assert!(root.children[1].label.starts_with("Decode error:"));
        assert!(root.children[1].anomalous);
    }

    #[test]
    fn register_overrides_existing_code() {
        fn decode_nothing(
            _buffer: &mut ChunkBuffer,
            _out: &mut Vec<Node>,
        ) -> Result<(), ChunkError> {
            Ok(())
        }

        let mut registry = registry();
        registry.register(
            0x0001,
            Decoder {
                name: "Replacement",
                decode: decode_nothing,
            },
        );
        assert_eq!(registry.name_for(0x0001), Some("Replacement"));
    }

    #[test]
    fn dissection_is_deterministic() {
        let data = [0x05, 0x00, 0x07, 0x00];
        let registry = registry();
        let first = registry.dissect(0x0001, &mut ChunkBuffer::new(&data));
        let second = registry.dissect(0x0001, &mut ChunkBuffer::new(&data));
        assert_eq!(first, second);
    }
}
