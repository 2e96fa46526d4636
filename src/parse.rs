//! Shared URI parsing used by both [`crate::Uri`] and [`crate::UriBuilder`].
//!
//! Splitting happens first, on raw text; percent-decoding runs afterwards,
//! per component, so an encoded delimiter (`%23`, `%3F`, ...) inside a
//! value never terminates a field. Every component is optional: a missing
//! part parses to `None`, never to an error.

use crate::codec;
use crate::error::{DecodeError, ParseError, ParseErrorKind};
use crate::query::QueryMap;

/// Decoded field set of a parsed URI string.
#[derive(Debug, Clone, Default)]
pub(crate) struct Parts {
    pub(crate) scheme: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Option<String>,
    pub(crate) query: Option<QueryMap>,
    pub(crate) fragment: Option<String>,
}

/// Parses a URI string into its decoded parts.
pub(crate) fn parse_uri(input: &str) -> Result<Parts, ParseError> {
    parse_inner(input).map_err(|kind| ParseError {
        input: input.to_string(),
        kind,
    })
}

fn parse_inner(input: &str) -> Result<Parts, ParseErrorKind> {
    let mut parts = Parts::default();

    // Blank input carries no fields at all.
    if input.trim().is_empty() {
        return Ok(parts);
    }

    let (head, query, fragment) = split_query_fragment(input);

    if let Some(query) = query {
        parts.query = Some(QueryMap::parse(query).map_err(ParseErrorKind::InvalidQuery)?);
    }
    if let Some(fragment) = fragment {
        parts.fragment = Some(decode_component(fragment, ParseErrorKind::InvalidFragment)?);
    }

    let (scheme, rest) = split_scheme(head);
    parts.scheme = scheme.map(str::to_string);

    let rest = if let Some(authority_and_path) = rest.strip_prefix("//") {
        let (authority, path) = match authority_and_path.find('/') {
            Some(slash_idx) => (
                &authority_and_path[..slash_idx],
                &authority_and_path[slash_idx..],
            ),
            None => (authority_and_path, ""),
        };
        parse_authority(authority, &mut parts)?;
        path
    } else {
        rest
    };

    // Path is kept raw; absent when the remaining text is empty.
    if !rest.is_empty() {
        parts.path = Some(rest.to_string());
    }

    Ok(parts)
}

/// Splits off the raw query and fragment substrings.
///
/// The first `?` and the first `#` after it delimit the query; a `#`
/// appearing before any `?` starts the fragment directly, with no query.
fn split_query_fragment(input: &str) -> (&str, Option<&str>, Option<&str>) {
    let q_idx = input.find('?');
    let h_idx = input.find('#');

    match (q_idx, h_idx) {
        (Some(q), h) if h.is_none_or(|h| q < h) => {
            let after_q = &input[q + 1..];
            match after_q.find('#') {
                Some(h) => (&input[..q], Some(&after_q[..h]), Some(&after_q[h + 1..])),
                None => (&input[..q], Some(after_q), None),
            }
        }
        (_, Some(h)) => (&input[..h], None, Some(&input[h + 1..])),
        (_, None) => (input, None, None),
    }
}

/// Splits off the scheme, keeping case as given.
///
/// The scheme is the text before the first `:`, accepted only when
/// non-empty and free of `/` (so a relative path like `a/b:c` stays a
/// path). What follows the colon is the scheme-relative rest; a leading
/// `//` there (or at the very start, scheme-less) introduces an authority.
fn split_scheme(input: &str) -> (Option<&str>, &str) {
    if input.starts_with("//") {
        return (None, input);
    }
    match input.find(':') {
        Some(idx) if idx > 0 && !input[..idx].contains('/') => {
            (Some(&input[..idx]), &input[idx + 1..])
        }
        _ => (None, input),
    }
}

/// Parses `userInfo@host:port` into decoded fields.
///
/// The last `@` separates user-info from host, so host and port can never
/// contain `@`. The port is an all-digit suffix after the last `:`; a
/// non-digit suffix stays part of the host and the port is absent.
fn parse_authority(authority: &str, parts: &mut Parts) -> Result<(), ParseErrorKind> {
    let (user_info, host_port) = match authority.rfind('@') {
        Some(at_idx) => (Some(&authority[..at_idx]), &authority[at_idx + 1..]),
        None => (None, authority),
    };

    if let Some(user_info) = user_info {
        parts.user_info = Some(decode_component(
            user_info,
            ParseErrorKind::InvalidUserInfo,
        )?);
    }

    let host = match host_port.rfind(':') {
        Some(colon_idx) => {
            let port_str = &host_port[colon_idx + 1..];
            if !port_str.is_empty() && port_str.bytes().all(|b| b.is_ascii_digit()) {
                let port = port_str
                    .parse::<u16>()
                    .map_err(|_| ParseErrorKind::InvalidPort {
                        value: port_str.to_string(),
                    })?;
                parts.port = Some(port);
                &host_port[..colon_idx]
            } else {
                host_port
            }
        }
        None => host_port,
    };

    // Host is kept raw; empty means absent.
    if !host.is_empty() {
        parts.host = Some(host.to_string());
    }

    Ok(())
}

fn decode_component(
    raw: &str,
    wrap: fn(DecodeError) -> ParseErrorKind,
) -> Result<String, ParseErrorKind> {
    codec::decode(raw).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_uri() {
        let parts = parse_uri("http://user1@localhost:8080/this/is/a/path?a=1#frag").unwrap();
        assert_eq!(parts.scheme.as_deref(), Some("http"));
        assert_eq!(parts.user_info.as_deref(), Some("user1"));
        assert_eq!(parts.host.as_deref(), Some("localhost"));
        assert_eq!(parts.port, Some(8080));
        assert_eq!(parts.path.as_deref(), Some("/this/is/a/path"));
        assert_eq!(parts.query.unwrap().get_first("a"), Some("1"));
        assert_eq!(parts.fragment.as_deref(), Some("frag"));
    }

    #[test]
    fn parse_blank_yields_all_absent() {
        for input in ["", "   ", "\t\n"] {
            let parts = parse_uri(input).unwrap();
            assert!(parts.scheme.is_none());
            assert!(parts.host.is_none());
            assert!(parts.path.is_none());
            assert!(parts.query.is_none());
            assert!(parts.fragment.is_none());
        }
    }

    #[test]
    fn parse_scheme_without_authority() {
        let parts = parse_uri("mailto:someone").unwrap();
        assert_eq!(parts.scheme.as_deref(), Some("mailto"));
        assert!(parts.host.is_none());
        assert_eq!(parts.path.as_deref(), Some("someone"));
    }

    #[test]
    fn parse_bare_path() {
        let parts = parse_uri("/a/b").unwrap();
        assert!(parts.scheme.is_none());
        assert!(parts.host.is_none());
        assert_eq!(parts.path.as_deref(), Some("/a/b"));
    }

    #[test]
    fn colon_in_relative_path_is_not_a_scheme() {
        let parts = parse_uri("a/b:c").unwrap();
        assert!(parts.scheme.is_none());
        assert_eq!(parts.path.as_deref(), Some("a/b:c"));
    }

    #[test]
    fn parse_authority_without_scheme() {
        let parts = parse_uri("//localhost:8080/x").unwrap();
        assert!(parts.scheme.is_none());
        assert_eq!(parts.host.as_deref(), Some("localhost"));
        assert_eq!(parts.port, Some(8080));
        assert_eq!(parts.path.as_deref(), Some("/x"));
    }

    #[test]
    fn parse_host_without_port_or_path() {
        let parts = parse_uri("http://localhost").unwrap();
        assert_eq!(parts.host.as_deref(), Some("localhost"));
        assert!(parts.port.is_none());
        assert!(parts.path.is_none());
    }

    #[test]
    fn root_path_is_present() {
        let parts = parse_uri("http://localhost:8080/").unwrap();
        assert_eq!(parts.path.as_deref(), Some("/"));
    }

    #[test]
    fn last_at_wins_in_authority() {
        let parts = parse_uri("http://user@pass@host/x").unwrap();
        assert_eq!(parts.user_info.as_deref(), Some("user@pass"));
        assert_eq!(parts.host.as_deref(), Some("host"));
    }

    #[test]
    fn user_info_is_decoded() {
        let parts = parse_uri("http://user%401@host").unwrap();
        assert_eq!(parts.user_info.as_deref(), Some("user@1"));
    }

    #[test]
    fn non_digit_port_suffix_stays_in_host() {
        let parts = parse_uri("http://host:abc/x").unwrap();
        assert_eq!(parts.host.as_deref(), Some("host:abc"));
        assert!(parts.port.is_none());
    }

    #[test]
    fn port_out_of_range_fails() {
        let result = parse_uri("http://host:99999");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::InvalidPort { .. },
                ..
            })
        ));
    }

    #[test]
    fn port_zero_is_explicit() {
        let parts = parse_uri("http://host:0").unwrap();
        assert_eq!(parts.port, Some(0));
    }

    #[test]
    fn query_absent_without_question_mark() {
        let parts = parse_uri("http://host/path").unwrap();
        assert!(parts.query.is_none());
    }

    #[test]
    fn bare_question_mark_is_present_empty_query() {
        let parts = parse_uri("http://host/path?").unwrap();
        let query = parts.query.unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn fragment_absent_without_hash() {
        let parts = parse_uri("http://host/path").unwrap();
        assert!(parts.fragment.is_none());
    }

    #[test]
    fn empty_fragment_is_present_empty() {
        let parts = parse_uri("http://host/path#").unwrap();
        assert_eq!(parts.fragment.as_deref(), Some(""));
    }

    #[test]
    fn raw_hash_inside_query_text_is_a_delimiter() {
        let parts = parse_uri("http://host/p?a=1#2").unwrap();
        assert_eq!(parts.query.unwrap().get_first("a"), Some("1"));
        assert_eq!(parts.fragment.as_deref(), Some("2"));
    }

    #[test]
    fn encoded_hash_inside_query_is_not_a_delimiter() {
        let parts = parse_uri("http://host/p?a=1%232").unwrap();
        assert_eq!(parts.query.unwrap().get_first("a"), Some("1#2"));
        assert!(parts.fragment.is_none());
    }

    #[test]
    fn hash_before_question_mark_starts_fragment() {
        let parts = parse_uri("http://host/p#frag?not=query").unwrap();
        assert!(parts.query.is_none());
        assert_eq!(parts.fragment.as_deref(), Some("frag?not=query"));
    }

    #[test]
    fn path_is_not_percent_processed() {
        let parts = parse_uri("http://host/a%20b").unwrap();
        assert_eq!(parts.path.as_deref(), Some("/a%20b"));
    }

    #[test]
    fn malformed_user_info_encoding_fails() {
        let result = parse_uri("http://u%2@host");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::InvalidUserInfo(_),
                ..
            })
        ));
    }

    #[test]
    fn malformed_fragment_encoding_fails() {
        let result = parse_uri("http://host/p#%zz");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::InvalidFragment(_),
                ..
            })
        ));
    }

    #[test]
    fn empty_host_is_absent() {
        let parts = parse_uri("http://:8080/x").unwrap();
        assert!(parts.host.is_none());
        assert_eq!(parts.port, Some(8080));
    }
}
