//! Canned reply bodies.
//!
//! These are opaque fixed blobs captured from a real controller and sent
//! verbatim; peers key on their contents byte for byte. Do not re-derive
//! or prettify them.

/// Reply to a configuration request.
pub const CONFIGURATION_RESPONSE: &[u8] = &[
    0x0a, 0xbf, 0x94, 0x02, 0x02, 0x80, 0x00, 0x15, 0x27, 0x10, 0xab, 0xd2, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x15, 0x27, 0xff, 0xff, 0x10, 0xab, 0xd2,
];

/// Reply to the main control-configuration request.
pub const CONTROL_CONFIGURATION_RESPONSE: &[u8] = &[
    0x0a, 0xbf, 0x24, 0x64, 0xdc, 0x11, 0x00, 0x42, 0x46, 0x42, 0x50, 0x32, 0x30, 0x20, 0x20,
    0x01, 0x3d, 0x12, 0x38, 0x2e, 0x01, 0x0a, 0x04, 0x00,
];

/// Reply to the alternate control-configuration request.
pub const CONTROL_CONFIGURATION2_RESPONSE: &[u8] =
    &[0x0a, 0xbf, 0x2e, 0x0a, 0x00, 0x01, 0xd0, 0x00, 0x44];
