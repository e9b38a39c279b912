//! Lowercase hex helpers shared by the value types and the bytecode output.

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes bytes as lowercase hex without a prefix.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Returns the value of a single hex digit, either case.
pub fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Strips a lowercase `0x` prefix if present.
pub fn strip_prefix(token: &str) -> &str {
    token.strip_prefix("0x").unwrap_or(token)
}

/// Decodes exactly `N` bytes from `2 * N` hex digits.
pub fn decode_exact<const N: usize>(digits: &str) -> Option<[u8; N]> {
    let raw = digits.as_bytes();
    if raw.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    for (i, pair) in raw.chunks_exact(2).enumerate() {
        out[i] = (nibble(pair[0])? << 4) | nibble(pair[1])?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode(&[0x00, 0xab, 0xFF, 0x10]), "00abff10");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn nibble_accepts_both_cases() {
        assert_eq!(nibble(b'a'), Some(10));
        assert_eq!(nibble(b'F'), Some(15));
        assert_eq!(nibble(b'g'), None);
        assert_eq!(nibble(b'x'), None);
    }

    #[test]
    fn decode_exact_checks_length_and_digits() {
        assert_eq!(decode_exact::<2>("aBcd"), Some([0xab, 0xcd]));
        assert_eq!(decode_exact::<2>("abc"), None);
        assert_eq!(decode_exact::<2>("abcdef"), None);
        assert_eq!(decode_exact::<2>("zzzz"), None);
    }

    #[test]
    fn strip_prefix_only_lowercase() {
        assert_eq!(strip_prefix("0xab"), "ab");
        assert_eq!(strip_prefix("0Xab"), "0Xab");
        assert_eq!(strip_prefix("ab"), "ab");
    }
}
