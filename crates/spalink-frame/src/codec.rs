use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::frame_checksum;
use crate::error::{FrameError, MalformedKind, Result};

/// Frame delimiter byte, present at both ends of every frame.
pub const DELIMITER: u8 = 0x7e;

/// Envelope overhead: two delimiters, length byte, checksum byte.
pub const ENVELOPE_SIZE: usize = 4;

/// Largest body the single-byte length field can describe.
///
/// The length byte counts itself, the body, and the checksum.
pub const MAX_BODY: usize = 253;

/// Encode one frame into the wire format.
///
/// ```text
/// ┌──────┬─────┬────────────┬──────────┬──────┐
/// │ 0x7e │ LEN │ body       │ CHECKSUM │ 0x7e │
/// └──────┴─────┴────────────┴──────────┴──────┘
/// ```
///
/// `LEN = len(body) + 2` and `CHECKSUM = crc8(LEN ++ body)`.
pub fn encode_frame(body: &[u8], dst: &mut BytesMut) -> Result<()> {
    if body.len() > MAX_BODY {
        return Err(FrameError::BodyTooLarge { len: body.len() });
    }
    let len = (body.len() + 2) as u8;
    dst.reserve(body.len() + ENVELOPE_SIZE);
    dst.put_u8(DELIMITER);
    dst.put_u8(len);
    dst.put_slice(body);
    dst.put_u8(frame_checksum(len, body));
    dst.put_u8(DELIMITER);
    Ok(())
}

/// Decode a whole buffer as exactly one frame, returning the body.
///
/// There is no resynchronization: trailing garbage, a missing delimiter,
/// or a length disagreement fails the entire read, and the caller simply
/// discards it. The protocol is periodic, so a dropped frame is
/// superseded by the next broadcast.
pub fn decode_frame(raw: &[u8]) -> Result<Bytes> {
    if raw.len() < ENVELOPE_SIZE {
        return Err(FrameError::Malformed {
            raw: Bytes::copy_from_slice(raw),
            reason: MalformedKind::TooShort,
        });
    }
    if raw[0] != DELIMITER || raw[raw.len() - 1] != DELIMITER {
        return Err(FrameError::Malformed {
            raw: Bytes::copy_from_slice(raw),
            reason: MalformedKind::MissingDelimiter,
        });
    }

    let declared = raw[1];
    let body = &raw[2..raw.len() - 2];
    if body.len() + 2 != declared as usize {
        return Err(FrameError::Malformed {
            raw: Bytes::copy_from_slice(raw),
            reason: MalformedKind::LengthMismatch {
                declared,
                actual: body.len(),
            },
        });
    }

    let wire = raw[raw.len() - 2];
    let computed = frame_checksum(declared, body);
    if wire != computed {
        return Err(FrameError::ChecksumMismatch {
            raw: Bytes::copy_from_slice(raw),
            wire,
            computed,
        });
    }

    Ok(Bytes::copy_from_slice(body))
}
