//! Error types for URI parsing and percent-decoding.

use std::fmt;

/// Errors that can occur when percent-decoding a URI component.
///
/// Encoding never fails; decoding fails when a `%` escape is malformed
/// or when the decoded bytes are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by exactly two hexadecimal digits.
    InvalidPercent {
        /// The input that failed to decode
        value: String,
    },
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8 {
        /// The input that failed to decode
        value: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPercent { value } => {
                write!(
                    f,
                    "invalid percent encoding in '{value}': '%' must be followed by two hex digits"
                )
            }
            Self::InvalidUtf8 { value } => {
                write!(f, "percent-decoded bytes of '{value}' are not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors that can occur when parsing a URI string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
///
/// Absent components are never errors; only malformed percent escapes
/// and an out-of-range port are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The user-info portion failed to percent-decode
    InvalidUserInfo(DecodeError),
    /// A query name or value failed to percent-decode
    InvalidQuery(DecodeError),
    /// The fragment failed to percent-decode
    InvalidFragment(DecodeError),
    /// The port suffix is numeric but out of range
    InvalidPort {
        /// The invalid port text
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidUserInfo(e) => write!(f, "invalid user-info: {e}"),
            ParseErrorKind::InvalidQuery(e) => write!(f, "invalid query string: {e}"),
            ParseErrorKind::InvalidFragment(e) => write!(f, "invalid fragment: {e}"),
            ParseErrorKind::InvalidPort { value } => {
                write!(f, "invalid port '{value}': must be 0-65535")
            }
        }
    }
}

impl std::error::Error for ParseError {}
