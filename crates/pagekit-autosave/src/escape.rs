//! Legacy `escape()` / `unescape()` encoding
//!
//! Works on UTF-16 code units: `%XX` below 0x100, `%uXXXX` above. Cookie
//! values written by older pages use this encoding, so it is kept exactly.

const UNRESERVED: &str = "@*_+-./";

/// Encode a string the way JavaScript's `escape()` does
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for unit in input.encode_utf16() {
        match char::from_u32(u32::from(unit)) {
            Some(c) if c.is_ascii_alphanumeric() || UNRESERVED.contains(c) => out.push(c),
            _ if unit < 0x100 => out.push_str(&format!("%{unit:02X}")),
            _ => out.push_str(&format!("%u{unit:04X}")),
        }
    }
    out
}

/// Decode `escape()` output. Malformed sequences are kept literally.
pub fn unescape(input: &str) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut out = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        if units[i] == u16::from(b'%') {
            if units.get(i + 1) == Some(&u16::from(b'u')) {
                if let Some(v) = hex_value(units.get(i + 2..i + 6)) {
                    out.push(v);
                    i += 6;
                    continue;
                }
            } else if let Some(v) = hex_value(units.get(i + 1..i + 3)) {
                out.push(v);
                i += 3;
                continue;
            }
        }
        out.push(units[i]);
        i += 1;
    }

    String::from_utf16_lossy(&out)
}

fn hex_value(digits: Option<&[u16]>) -> Option<u16> {
    digits?.iter().try_fold(0u16, |acc, &d| {
        let digit = char::from_u32(u32::from(d))?.to_digit(16)?;
        Some(acc * 16 + digit as u16)
    })
}
