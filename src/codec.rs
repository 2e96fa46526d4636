//! Percent-encoding and decoding of individual URI components.
//!
//! Each component kind carries its own safe-character set: unreserved
//! characters (letters, digits, `-`, `.`, `_`, `~`) always pass through,
//! and a component may additionally keep its own structural delimiters
//! unescaped (the path keeps `/`; query keys and values keep nothing,
//! since `&`, `=`, and `?` are structural there).
//!
//! Decoding is strict: a `%` not followed by two hex digits, or decoded
//! bytes that are not valid UTF-8, fail with [`DecodeError`]. The lenient
//! pass-through behavior of `percent_encoding::percent_decode` is
//! deliberately not used on the decode side.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::error::DecodeError;

/// Escape set leaving only unreserved characters unescaped.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape set for path content: unreserved plus the segment separator.
const PATH: &AsciiSet = &UNRESERVED.remove(b'/');

/// The URI component a string is being encoded for.
///
/// Determines which characters survive encoding unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The `userInfo` portion of an authority (before `@`)
    UserInfo,
    /// A path, where `/` separators stay unescaped
    Path,
    /// A query parameter name
    QueryKey,
    /// A query parameter value
    QueryValue,
    /// The fragment (after `#`)
    Fragment,
}

impl Component {
    const fn escape_set(self) -> &'static AsciiSet {
        match self {
            Self::Path => PATH,
            Self::UserInfo | Self::QueryKey | Self::QueryValue | Self::Fragment => UNRESERVED,
        }
    }
}

/// Percent-encodes `raw` for use inside the given URI component.
///
/// Bytes outside the component's safe set are escaped as `%` followed by
/// two uppercase hex digits, per UTF-8 byte. Encoding never fails.
///
/// # Examples
///
/// ```
/// use flex_uri::{Component, encode};
///
/// assert_eq!(encode("user@1", Component::UserInfo), "user%401");
/// assert_eq!(encode("/a b/c", Component::Path), "/a%20b/c");
/// ```
#[must_use]
pub fn encode(raw: &str, component: Component) -> String {
    percent_encode(raw.as_bytes(), component.escape_set()).to_string()
}

/// Percent-decodes an encoded URI component.
///
/// # Errors
///
/// Returns [`DecodeError`] if a `%` is not followed by exactly two hex
/// digits, or if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use flex_uri::decode;
///
/// assert_eq!(decode("user%401").unwrap(), "user@1");
/// assert!(decode("%G1").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(encoded.len());
    let mut bytes = encoded.bytes();

    while let Some(b) = bytes.next() {
        if b == b'%' {
            let hi = bytes.next().and_then(hex_value);
            let lo = bytes.next().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => {
                    return Err(DecodeError::InvalidPercent {
                        value: encoded.to_string(),
                    });
                }
            }
        } else {
            out.push(b);
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8 {
        value: encoded.to_string(),
    })
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_pass_through() {
        assert_eq!(encode("Az09-._~", Component::QueryValue), "Az09-._~");
    }

    #[test]
    fn structural_chars_are_escaped_in_query() {
        assert_eq!(encode("a&b=c?d", Component::QueryValue), "a%26b%3Dc%3Fd");
    }

    #[test]
    fn path_keeps_slashes() {
        assert_eq!(encode("/a/b c", Component::Path), "/a/b%20c");
    }

    #[test]
    fn user_info_escapes_at_sign() {
        assert_eq!(encode("user@1", Component::UserInfo), "user%401");
    }

    #[test]
    fn encode_uses_uppercase_hex() {
        assert_eq!(encode(" ", Component::Fragment), "%20");
        assert_eq!(encode("\u{7f}", Component::Fragment), "%7F");
    }

    #[test]
    fn encode_is_per_utf8_byte() {
        assert_eq!(encode("é", Component::QueryValue), "%C3%A9");
    }

    #[test]
    fn decode_roundtrips_encoded_value() {
        let raw = "a b&c=d@é/";
        let encoded = encode(raw, Component::QueryValue);
        assert_eq!(decode(&encoded).unwrap(), raw);
    }

    #[test]
    fn decode_plain_text_unchanged() {
        assert_eq!(decode("plain-text_1.2~").unwrap(), "plain-text_1.2~");
    }

    #[test]
    fn decode_mixed_case_hex() {
        assert_eq!(decode("%2f%2F").unwrap(), "//");
    }

    #[test]
    fn decode_truncated_escape_fails() {
        assert!(matches!(
            decode("abc%4"),
            Err(DecodeError::InvalidPercent { .. })
        ));
        assert!(matches!(
            decode("abc%"),
            Err(DecodeError::InvalidPercent { .. })
        ));
    }

    #[test]
    fn decode_non_hex_escape_fails() {
        assert!(matches!(
            decode("%G1"),
            Err(DecodeError::InvalidPercent { .. })
        ));
    }

    #[test]
    fn decode_invalid_utf8_fails() {
        // 0xC3 starts a two-byte sequence that never completes.
        assert!(matches!(
            decode("%C3%28"),
            Err(DecodeError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(decode("").unwrap(), "");
    }
}
