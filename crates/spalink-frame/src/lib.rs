//! Delimited, checksummed message framing for the spa control protocol.
//!
//! Every message on the wire is wrapped in the same envelope:
//! - A `0x7e` delimiter on each end
//! - A 1-byte length covering itself, the body, and the checksum
//! - A CRC-8 checksum over the length byte and the body
//!
//! Decoding is strict and non-resynchronizing: a read either holds one
//! complete, valid frame or it is discarded whole.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod hex;
pub mod writer;

pub use checksum::checksum;
pub use codec::{decode_frame, encode_frame, DELIMITER, ENVELOPE_SIZE, MAX_BODY};
pub use error::{FrameError, MalformedKind, Result};
pub use hex::hex;
pub use writer::FrameWriter;
