use std::fmt::Write as _;

/// Render bytes as space-separated lowercase hex for diagnostics.
///
/// Decode failures keep their raw bytes; this is how they end up in logs.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}
