//! `NotifyMsg` family: a notification carrying a list of event records.
//!
//! This is the composition exemplar: an outer fixed schema followed by a
//! count-prefixed sequence of records that each sub-dispatch on their own
//! type code.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

use super::decode_message_base;
use super::event::decode_event;

pub fn decode(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
    decode_message_base(buffer, out)?;

    out.push(Node::leaf(format!("Type: {}", buffer.read_i32()?)));
    out.push(Node::leaf(format!("State: {}", buffer.read_f32()?)));
    out.push(Node::leaf(format!("ID: {}", buffer.read_i32()?)));

    let count = buffer.read_u32()?;
    let mut events = Node::branch(format!("Events: {count}"));
    let mut result = Ok(());
    for index in 0..count {
        let mut record = Node::branch(format!("Event {index}"));
        let decoded = decode_event(buffer, &mut record.children);
        events.push(record);
        if let Err(err) = decoded {
            result = Err(err);
            break;
        }
    }
    out.push(events);
    result
}
