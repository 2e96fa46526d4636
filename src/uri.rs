//! Immutable URI value type.

use std::fmt;
use std::str::FromStr;

use crate::codec::{self, Component};
use crate::error::ParseError;
use crate::parse::{Parts, parse_uri};
use crate::query::QueryMap;

/// A parsed, immutable URI snapshot.
///
/// Every field is optional, and absence is distinct from an empty string
/// (and from port 0): a parsed URI missing a component and a built URI
/// where that component was never set are indistinguishable. Once
/// constructed, a `Uri` never changes; it is safe to share across
/// concurrent readers.
///
/// User-info, query names/values, and the fragment are stored decoded and
/// re-encoded on output. Host and path are stored raw and passed through
/// as-is.
///
/// # Examples
///
/// ```
/// use flex_uri::Uri;
///
/// let uri = Uri::parse("http://localhost:8080/?a=1&b=2#frag").unwrap();
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("localhost"));
/// assert_eq!(uri.port(), Some(8080));
/// assert_eq!(uri.path(), Some("/"));
/// assert_eq!(uri.query_first("b"), Some("2"));
/// assert_eq!(uri.fragment(), Some("frag"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<QueryMap>,
    fragment: Option<String>,
    /// Canonical string representation, built once at construction
    canonical: String,
}

impl Uri {
    /// Parses a URI from a string.
    ///
    /// Blank input is valid and yields a URI with every field absent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the user-info, a query name or value, or
    /// the fragment is not validly percent-encoded, or if a numeric port
    /// suffix is out of range.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self::from_parts(parse_uri(input)?))
    }

    pub(crate) fn from_parts(parts: Parts) -> Self {
        let canonical = canonical_string(
            parts.scheme.as_deref(),
            parts.user_info.as_deref(),
            parts.host.as_deref(),
            parts.port,
            parts.path.as_deref(),
            parts.query.as_ref(),
            parts.fragment.as_deref(),
        );
        Self {
            scheme: parts.scheme,
            user_info: parts.user_info,
            host: parts.host,
            port: parts.port,
            path: parts.path,
            query: parts.query,
            fragment: parts.fragment,
            canonical,
        }
    }

    pub(crate) fn into_parts(self) -> Parts {
        Parts {
            scheme: self.scheme,
            user_info: self.user_info,
            host: self.host,
            port: self.port,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
        }
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the decoded user-info, if present.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// Returns the raw host, if present.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if present. Port 0 is distinct from absent.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the raw path, if present. Absent is distinct from empty.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the query multimap, if present.
    ///
    /// The query is absent when the parsed input had no `?` at all, which
    /// is distinct from a present-but-empty map.
    #[must_use]
    pub const fn query(&self) -> Option<&QueryMap> {
        self.query.as_ref()
    }

    /// Returns the first value for a query parameter.
    ///
    /// Returns `None` when the query or the name is absent, or when the
    /// first entry is a flag.
    #[must_use]
    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.query.as_ref()?.get_first(name)
    }

    /// Returns all values for a query parameter in insertion order, or
    /// `None` if the query or the name is absent.
    #[must_use]
    pub fn query_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.query.as_ref()?.get_all(name)
    }

    /// Returns the decoded fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Writes the canonical encoded form shared by [`Uri`] and
/// [`crate::UriBuilder`].
///
/// Layout: `scheme:` `//` `userInfo@` `host` `:port` `path` `?query`
/// `#fragment`, each emitted only when present. The authority block
/// (`//...`) appears only when the host is present; user-info and port
/// are tied to it. Host and path pass through raw; user-info, query, and
/// fragment are percent-encoded here.
pub(crate) fn canonical_string(
    scheme: Option<&str>,
    user_info: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
    path: Option<&str>,
    query: Option<&QueryMap>,
    fragment: Option<&str>,
) -> String {
    let mut out = String::new();

    if let Some(scheme) = scheme {
        out.push_str(scheme);
        out.push(':');
    }

    if let Some(host) = host {
        out.push_str("//");
        if let Some(user_info) = user_info {
            out.push_str(&codec::encode(user_info, Component::UserInfo));
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    }

    if let Some(path) = path {
        out.push_str(path);
    }

    if let Some(query) = query {
        out.push('?');
        out.push_str(&query.to_string());
    }

    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(&codec::encode(fragment, Component::Fragment));
    }

    out
}
