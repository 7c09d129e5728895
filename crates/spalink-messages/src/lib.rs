//! Message layer of the spa control protocol.
//!
//! A message body is a 2-byte type tag followed by a payload. The status
//! broadcast is the only deeply structured message; commands are small
//! fixed payloads. Unknown tags and bad payload lengths surface as
//! [`InvalidMessage`] with the raw bytes preserved for logging.

pub mod error;
pub mod message;
pub mod status;

pub use error::{InvalidMessage, ParseFailure};
pub use message::{ControlConfigKind, Message, ToggleTarget};
pub use status::{
    HeatingMode, Notification, Status, TemperatureRange, TemperatureScale,
};
