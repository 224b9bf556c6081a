//! Event-record decoder, the nested dispatch inside `NotifyMsg`.
//!
//! The record leads with a `u32` event-type code selecting a fixed field
//! schema. Codes outside the enumeration consume nothing further: the
//! format has no length field, so there is nothing safe to skip by.

use crate::chunk::{ChunkBuffer, ChunkError};
use crate::tree::Node;

use super::bool_name;
use super::key::decode_key;

/// Event-type enumeration carried on the wire as a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Invalid,
    Collision,
    Picked,
    ControlKey,
    Variable,
    Facing,
    Contained,
    Activate,
    Callback,
    ResponderState,
    MultiStage,
    Spawned,
    ClickDrag,
    Coop,
    OfferLinkBook,
    Book,
    ClimbingBlockerHit,
    None,
}

impl EventType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Invalid),
            1 => Some(Self::Collision),
            2 => Some(Self::Picked),
            3 => Some(Self::ControlKey),
            4 => Some(Self::Variable),
            5 => Some(Self::Facing),
            6 => Some(Self::Contained),
            7 => Some(Self::Activate),
            8 => Some(Self::Callback),
            9 => Some(Self::ResponderState),
            10 => Some(Self::MultiStage),
            11 => Some(Self::Spawned),
            12 => Some(Self::ClickDrag),
            13 => Some(Self::Coop),
            14 => Some(Self::OfferLinkBook),
            15 => Some(Self::Book),
            16 => Some(Self::ClimbingBlockerHit),
            17 => Some(Self::None),
            _ => Option::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Collision => "Collision",
            Self::Picked => "Picked",
            Self::ControlKey => "ControlKey",
            Self::Variable => "Variable",
            Self::Facing => "Facing",
            Self::Contained => "Contained",
            Self::Activate => "Activate",
            Self::Callback => "Callback",
            Self::ResponderState => "ResponderState",
            Self::MultiStage => "MultiStage",
            Self::Spawned => "Spawned",
            Self::ClickDrag => "ClickDrag",
            Self::Coop => "Coop",
            Self::OfferLinkBook => "OfferLinkBook",
            Self::Book => "Book",
            Self::ClimbingBlockerHit => "ClimbingBlockerHit",
            Self::None => "None",
        }
    }
}

/// Decode one event record, appending its nodes to `out`.
///
/// An out-of-range code emits exactly one anomalous node carrying the raw
/// value and reads nothing further.
pub fn decode_event(buffer: &mut ChunkBuffer, out: &mut Vec<Node>) -> Result<(), ChunkError> {
    let code = buffer.read_u32()?;
    let Some(event) = EventType::from_code(code) else {
        out.push(Node::anomaly(format!("Type: {code} (Unknown)")));
        return Ok(());
    };
    out.push(Node::leaf(format!("Type: {}", event.name())));

    match event {
        EventType::Collision => {
            out.push(Node::leaf(format!(
                "Enter: {}",
                bool_name(buffer.read_bool()?)
            )));
            out.push(decode_key("Hitter", buffer)?);
            out.push(decode_key("Hittee", buffer)?);
        }
        EventType::Picked => {
            out.push(decode_key("Picker", buffer)?);
            out.push(decode_key("Picked", buffer)?);
            out.push(Node::leaf(format!(
                "Enabled: {}",
                bool_name(buffer.read_bool()?)
            )));
            let x = buffer.read_f32()?;
            let y = buffer.read_f32()?;
            let z = buffer.read_f32()?;
            out.push(Node::leaf(format!("Hit Point: ({x}, {y}, {z})")));
        }
        EventType::ControlKey => {
            out.push(Node::leaf(format!("Key: {}", buffer.read_i32()?)));
            out.push(Node::leaf(format!(
                "Down: {}",
                bool_name(buffer.read_bool()?)
            )));
        }
        EventType::Variable => {
            out.push(Node::leaf(format!("Name: {}", buffer.read_safe_string()?)));
            out.push(Node::leaf(format!("Type: {}", buffer.read_u32()?)));
            out.push(Node::leaf(format!("Number: {}", buffer.read_f32()?)));
            out.push(decode_key("Key", buffer)?);
        }
        EventType::Facing => {
            out.push(decode_key("Facer", buffer)?);
            out.push(decode_key("Facee", buffer)?);
            out.push(Node::leaf(format!("Dot: {}", buffer.read_f32()?)));
            out.push(Node::leaf(format!(
                "Enabled: {}",
                bool_name(buffer.read_bool()?)
            )));
        }
        EventType::Contained => {
            out.push(decode_key("Container", buffer)?);
            out.push(decode_key("Containee", buffer)?);
            out.push(Node::leaf(format!(
                "Entering: {}",
                bool_name(buffer.read_bool()?)
            )));
        }
        EventType::Activate => {
            out.push(Node::leaf(format!(
                "Active: {}",
                bool_name(buffer.read_bool()?)
            )));
            out.push(Node::leaf(format!(
                "Activate: {}",
                bool_name(buffer.read_bool()?)
            )));
        }
        EventType::Callback => {
            out.push(Node::leaf(format!("Type: {}", buffer.read_i32()?)));
        }
        EventType::ResponderState => {
            out.push(Node::leaf(format!("State: {}", buffer.read_i32()?)));
        }
        EventType::MultiStage => {
            out.push(Node::leaf(format!("Stage: {}", buffer.read_u32()?)));
            out.push(Node::leaf(format!("Event: {}", buffer.read_u32()?)));
            out.push(decode_key("Avatar", buffer)?);
        }
        EventType::Spawned => {
            out.push(decode_key("Spawner", buffer)?);
            out.push(decode_key("Spawnee", buffer)?);
        }
        EventType::Coop => {
            out.push(Node::leaf(format!("ID: {}", buffer.read_u32()?)));
            out.push(Node::leaf(format!("Serial: {}", buffer.read_u16()?)));
        }
        EventType::OfferLinkBook => {
            out.push(decode_key("Offerer", buffer)?);
            out.push(Node::leaf(format!("Target Age: {}", buffer.read_u32()?)));
            out.push(Node::leaf(format!("Offeree: {}", buffer.read_u32()?)));
        }
        EventType::Book => {
            out.push(Node::leaf(format!("Event: {}", buffer.read_u32()?)));
            out.push(Node::leaf(format!("Link ID: {}", buffer.read_u32()?)));
        }
        EventType::ClimbingBlockerHit => {
            out.push(decode_key("Blocker", buffer)?);
        }
        EventType::ClickDrag | EventType::None => {}
        EventType::Invalid => {
            // The enumeration names code 0 but no schema exists for it.
            out.push(Node::anomaly("Unsupported event type (0)"));
        }
    }
    Ok(())
}
