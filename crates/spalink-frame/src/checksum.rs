use crc::{Algorithm, Crc};

/// CRC-8 variant used by the controller: polynomial 0x07, init 0x02,
/// final xor 0x02, no bit reflection.
pub const SPA_CRC8: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x07,
    init: 0x02,
    refin: false,
    refout: false,
    xorout: 0x02,
    check: 0x04,
    residue: 0x00,
};

const CRC8: Crc<u8> = Crc::<u8>::new(&SPA_CRC8);

/// Single-byte checksum over a byte sequence.
///
/// Used identically on the encode and verify paths; interoperability with
/// the physical device depends on this exact variant.
pub fn checksum(bytes: &[u8]) -> u8 {
    CRC8.checksum(bytes)
}

/// Checksum over a frame's length byte followed by its body, without
/// materializing the concatenation.
pub(crate) fn frame_checksum(len: u8, body: &[u8]) -> u8 {
    let mut digest = CRC8.digest();
    digest.update(&[len]);
    digest.update(body);
    digest.finalize()
}
