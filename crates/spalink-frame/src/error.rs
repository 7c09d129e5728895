use bytes::Bytes;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The buffer is not a well-formed frame (delimiters or length).
    ///
    /// The offending raw bytes are retained so callers can log them.
    #[error("malformed frame: {reason}")]
    Malformed { raw: Bytes, reason: MalformedKind },

    /// The recomputed checksum disagrees with the one on the wire.
    #[error("frame checksum mismatch (wire {wire:#04x}, computed {computed:#04x})")]
    ChecksumMismatch { raw: Bytes, wire: u8, computed: u8 },

    /// The body does not fit in the single-byte length field.
    #[error("frame body too large ({len} bytes, max 253)")]
    BodyTooLarge { len: usize },

    /// The connection was closed while writing a frame.
    #[error("connection closed")]
    ConnectionClosed,

    /// An I/O error occurred while writing a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// The raw bytes attached to a decode failure, if any.
    pub fn raw(&self) -> Option<&Bytes> {
        match self {
            FrameError::Malformed { raw, .. } | FrameError::ChecksumMismatch { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

/// Why a buffer failed structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedKind {
    /// Shorter than the smallest possible frame.
    #[error("buffer too short to hold a frame")]
    TooShort,

    /// The buffer does not start and end with the 0x7e delimiter.
    #[error("missing 0x7e delimiter")]
    MissingDelimiter,

    /// The declared length disagrees with the actual body length.
    #[error("declared length {declared} does not match body length {actual}")]
    LengthMismatch { declared: u8, actual: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
