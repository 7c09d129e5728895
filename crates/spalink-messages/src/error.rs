use bytes::Bytes;

/// A message body that could not be decoded.
///
/// The raw bytes are always preserved; callers log them rather than
/// dropping the evidence.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidMessage {
    pub raw: Bytes,
    pub reason: ParseFailure,
}

impl InvalidMessage {
    pub fn new(raw: &[u8], reason: ParseFailure) -> Self {
        Self {
            raw: Bytes::copy_from_slice(raw),
            reason,
        }
    }
}

/// Why a message body failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    /// Body shorter than the 2-byte type tag.
    #[error("message body shorter than the type tag")]
    Truncated,

    /// The type tag is not one this codec knows.
    #[error("unknown message type {0:#06x}")]
    UnknownType(u16),

    /// Payload length outside the range the variant accepts.
    #[error("payload length {len} outside {min}..={max} for message type {tag:#06x}")]
    PayloadLength {
        tag: u16,
        len: usize,
        min: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, InvalidMessage>;
