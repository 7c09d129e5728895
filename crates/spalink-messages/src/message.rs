use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{InvalidMessage, ParseFailure, Result};
use crate::status::{Status, TemperatureScale, STATUS_PAYLOAD_LENGTH};

/// Periodic status broadcast.
pub const STATUS_TYPE: u16 = 0xaf13;
/// Peer asks for the configuration blob.
pub const CONFIGURATION_REQUEST_TYPE: u16 = 0xbf04;
/// Peer asks for one of the two control-configuration blobs.
pub const CONTROL_CONFIGURATION_REQUEST_TYPE: u16 = 0xbf22;
/// Peer toggles a pump, light, mode or range.
pub const TOGGLE_ITEM_TYPE: u16 = 0xbf11;
/// Peer sets the target temperature.
pub const SET_TARGET_TEMPERATURE_TYPE: u16 = 0xbf20;
/// Peer switches between Fahrenheit and Celsius.
pub const SET_TEMPERATURE_SCALE_TYPE: u16 = 0xbf27;

/// Which control-configuration reply the peer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlConfigKind {
    Main,
    Alternate,
}

/// What a toggle command points at.
///
/// Codes the dispatcher does not act on still decode, as `Other`; real
/// panels send toggles for blowers and misters this server ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleTarget {
    Pump1,
    Pump2,
    Light1,
    TemperatureRange,
    HeatingMode,
    Other(u8),
}

impl ToggleTarget {
    fn from_code(code: u8) -> Self {
        match code {
            0x04 => ToggleTarget::Pump1,
            0x05 => ToggleTarget::Pump2,
            0x11 => ToggleTarget::Light1,
            0x50 => ToggleTarget::TemperatureRange,
            0x51 => ToggleTarget::HeatingMode,
            other => ToggleTarget::Other(other),
        }
    }

    fn code(self) -> u8 {
        match self {
            ToggleTarget::Pump1 => 0x04,
            ToggleTarget::Pump2 => 0x05,
            ToggleTarget::Light1 => 0x11,
            ToggleTarget::TemperatureRange => 0x50,
            ToggleTarget::HeatingMode => 0x51,
            ToggleTarget::Other(code) => code,
        }
    }
}

/// One decoded protocol message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Status(Status),
    ConfigurationRequest,
    ControlConfigurationRequest { kind: ControlConfigKind },
    SetTargetTemperature { temperature: u8 },
    SetTemperatureScale { scale: TemperatureScale },
    ToggleItem { item: ToggleTarget },
}

impl Message {
    /// Parse a message body: 2-byte type tag, then the variant payload.
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.len() < 2 {
            return Err(InvalidMessage::new(body, ParseFailure::Truncated));
        }
        let tag = u16::from_be_bytes([body[0], body[1]]);
        let payload = &body[2..];

        match tag {
            STATUS_TYPE => {
                check_length(body, tag, payload, STATUS_PAYLOAD_LENGTH)?;
                Ok(Message::Status(Status::decode(payload)))
            }
            CONFIGURATION_REQUEST_TYPE => {
                check_length(body, tag, payload, 0..=0)?;
                Ok(Message::ConfigurationRequest)
            }
            CONTROL_CONFIGURATION_REQUEST_TYPE => {
                check_length(body, tag, payload, 3..=3)?;
                let kind = if payload == [0x02, 0x00, 0x00] {
                    ControlConfigKind::Main
                } else {
                    ControlConfigKind::Alternate
                };
                Ok(Message::ControlConfigurationRequest { kind })
            }
            SET_TARGET_TEMPERATURE_TYPE => {
                check_length(body, tag, payload, 1..=1)?;
                Ok(Message::SetTargetTemperature {
                    temperature: payload[0],
                })
            }
            SET_TEMPERATURE_SCALE_TYPE => {
                check_length(body, tag, payload, 2..=2)?;
                let scale = if payload[1] == 0x01 {
                    TemperatureScale::Celsius
                } else {
                    TemperatureScale::Fahrenheit
                };
                Ok(Message::SetTemperatureScale { scale })
            }
            TOGGLE_ITEM_TYPE => {
                check_length(body, tag, payload, 2..=2)?;
                Ok(Message::ToggleItem {
                    item: ToggleTarget::from_code(payload[0]),
                })
            }
            unknown => Err(InvalidMessage::new(body, ParseFailure::UnknownType(unknown))),
        }
    }

    /// Serialize this message as a body: type tag, then the payload.
    pub fn encode(&self) -> Bytes {
        let mut body = BytesMut::with_capacity(2 + 32);
        body.put_u16(self.tag());
        match self {
            Message::Status(status) => body.put_slice(&status.encode()),
            Message::ConfigurationRequest => {}
            Message::ControlConfigurationRequest { kind } => match kind {
                ControlConfigKind::Main => body.put_slice(&[0x02, 0x00, 0x00]),
                ControlConfigKind::Alternate => body.put_slice(&[0x00, 0x00, 0x01]),
            },
            Message::SetTargetTemperature { temperature } => body.put_u8(*temperature),
            Message::SetTemperatureScale { scale } => {
                body.put_u8(0x01);
                body.put_u8(match scale {
                    TemperatureScale::Fahrenheit => 0x00,
                    TemperatureScale::Celsius => 0x01,
                });
            }
            Message::ToggleItem { item } => {
                body.put_u8(item.code());
                body.put_u8(0x00);
            }
        }
        body.freeze()
    }

    /// The 2-byte type tag for this variant.
    pub fn tag(&self) -> u16 {
        match self {
            Message::Status(_) => STATUS_TYPE,
            Message::ConfigurationRequest => CONFIGURATION_REQUEST_TYPE,
            Message::ControlConfigurationRequest { .. } => CONTROL_CONFIGURATION_REQUEST_TYPE,
            Message::SetTargetTemperature { .. } => SET_TARGET_TEMPERATURE_TYPE,
            Message::SetTemperatureScale { .. } => SET_TEMPERATURE_SCALE_TYPE,
            Message::ToggleItem { .. } => TOGGLE_ITEM_TYPE,
        }
    }
}

fn check_length(
    body: &[u8],
    tag: u16,
    payload: &[u8],
    accepted: std::ops::RangeInclusive<usize>,
) -> Result<()> {
    if accepted.contains(&payload.len()) {
        return Ok(());
    }
    Err(InvalidMessage::new(
        body,
        ParseFailure::PayloadLength {
            tag,
            len: payload.len(),
            min: *accepted.start(),
            max: *accepted.end(),
        },
    ))
}
