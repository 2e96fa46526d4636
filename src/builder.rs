//! Mutable builder for assembling [`Uri`] values.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parse::{Parts, parse_uri};
use crate::query::QueryMap;
use crate::uri::{Uri, canonical_string};

/// A mutable URI accumulator.
///
/// A builder starts empty, from a parsed string, or as a deep copy of an
/// existing [`Uri`]. Setters consume and return the builder for fluent
/// chaining; each unconditionally overwrites its field, and every field
/// has a `clear_*` counterpart that makes it absent again. Query
/// parameters are append-only: repeated [`query`](Self::query) calls
/// build multi-valued parameters.
///
/// The builder can be materialized any number of times, via
/// `to_string()` for the canonical encoded form or
/// [`to_immutable`](Self::to_immutable) for a [`Uri`] snapshot. Snapshots
/// own independent copies; mutating the builder afterwards never affects
/// them. A builder is not safe for concurrent mutation; share [`Uri`]
/// snapshots across threads instead.
///
/// # Examples
///
/// ```
/// use flex_uri::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("http")
///     .host("localhost")
///     .port(8080)
///     .path("/items")
///     .query("a", "1")
///     .query("a", "2")
///     .to_string();
/// assert_eq!(uri, "http://localhost:8080/items?a=1&a=2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    parts: Parts,
}

impl UriBuilder {
    /// Creates a builder with every field absent.
    ///
    /// An untouched builder stringifies to `""`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a URI string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] under the same conditions as [`Uri::parse`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            parts: parse_uri(input)?,
        })
    }

    /// Creates a builder holding independent copies of a URI's fields.
    ///
    /// The builder keeps no reference back to `uri`; mutating it never
    /// affects the original.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        Self::from(uri)
    }

    /// Sets the scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.parts.scheme = Some(scheme.into());
        self
    }

    /// Clears the scheme back to absent.
    #[must_use]
    pub fn clear_scheme(mut self) -> Self {
        self.parts.scheme = None;
        self
    }

    /// Sets or clears the scheme: `None` makes it absent.
    #[must_use]
    pub fn maybe_scheme(mut self, scheme: Option<impl Into<String>>) -> Self {
        self.parts.scheme = scheme.map(Into::into);
        self
    }

    /// Sets the user-info, in decoded form; it is percent-encoded on
    /// output.
    #[must_use]
    pub fn user_info(mut self, user_info: impl Into<String>) -> Self {
        self.parts.user_info = Some(user_info.into());
        self
    }

    /// Clears the user-info back to absent.
    #[must_use]
    pub fn clear_user_info(mut self) -> Self {
        self.parts.user_info = None;
        self
    }

    /// Sets or clears the user-info: `None` makes it absent.
    #[must_use]
    pub fn maybe_user_info(mut self, user_info: Option<impl Into<String>>) -> Self {
        self.parts.user_info = user_info.map(Into::into);
        self
    }

    /// Sets the host, kept raw (never percent-processed).
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.parts.host = Some(host.into());
        self
    }

    /// Clears the host back to absent.
    #[must_use]
    pub fn clear_host(mut self) -> Self {
        self.parts.host = None;
        self
    }

    /// Sets or clears the host: `None` makes it absent.
    #[must_use]
    pub fn maybe_host(mut self, host: Option<impl Into<String>>) -> Self {
        self.parts.host = host.map(Into::into);
        self
    }

    /// Sets the port. Port 0 is a real value, distinct from absent.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.parts.port = Some(port);
        self
    }

    /// Clears the port back to absent.
    #[must_use]
    pub fn clear_port(mut self) -> Self {
        self.parts.port = None;
        self
    }

    /// Sets or clears the port: `None` makes it absent.
    #[must_use]
    pub fn maybe_port(mut self, port: Option<u16>) -> Self {
        self.parts.port = port;
        self
    }

    /// Sets the path, kept raw with its leading slash as given.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.parts.path = Some(path.into());
        self
    }

    /// Clears the path back to absent.
    #[must_use]
    pub fn clear_path(mut self) -> Self {
        self.parts.path = None;
        self
    }

    /// Sets or clears the path: `None` makes it absent.
    #[must_use]
    pub fn maybe_path(mut self, path: Option<impl Into<String>>) -> Self {
        self.parts.path = path.map(Into::into);
        self
    }

    /// Appends a relative segment to the path with exactly one `/`
    /// separator, deduplicating where the path ends with `/` or the
    /// segment starts with one. No `.`/`..` normalization is applied.
    /// On an absent path the segment becomes the path as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_uri::UriBuilder;
    ///
    /// let b = UriBuilder::new().path("/api").rel("v1").rel("/items");
    /// assert_eq!(b.to_string(), "/api/v1/items");
    /// ```
    #[must_use]
    pub fn rel(mut self, relative: impl Into<String>) -> Self {
        let relative = relative.into();
        self.parts.path = Some(match self.parts.path.take() {
            None => relative,
            Some(mut path) => {
                match (path.ends_with('/'), relative.starts_with('/')) {
                    (true, true) => path.push_str(&relative[1..]),
                    (false, false) => {
                        path.push('/');
                        path.push_str(&relative);
                    }
                    _ => path.push_str(&relative),
                }
                path
            }
        });
        self
    }

    /// Appends a value for a query parameter.
    ///
    /// Never overwrites: calling twice with the same name builds a
    /// multi-valued parameter. The first call makes an absent query
    /// present.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts
            .query
            .get_or_insert_with(QueryMap::new)
            .put(name, Some(value));
        self
    }

    /// Appends a flag query parameter (a name with no value), which
    /// serializes without `=`.
    #[must_use]
    pub fn query_flag(mut self, name: impl Into<String>) -> Self {
        self.parts
            .query
            .get_or_insert_with(QueryMap::new)
            .put(name, None::<String>);
        self
    }

    /// Removes all values for a query parameter. The query itself stays
    /// present, possibly empty.
    #[must_use]
    pub fn remove_query(mut self, name: &str) -> Self {
        if let Some(query) = self.parts.query.as_mut() {
            query.remove(name);
        }
        self
    }

    /// Drops the whole query back to absent.
    #[must_use]
    pub fn clear_query(mut self) -> Self {
        self.parts.query = None;
        self
    }

    /// Sets the fragment, in decoded form; it is percent-encoded on
    /// output.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.parts.fragment = Some(fragment.into());
        self
    }

    /// Clears the fragment back to absent.
    #[must_use]
    pub fn clear_fragment(mut self) -> Self {
        self.parts.fragment = None;
        self
    }

    /// Sets or clears the fragment: `None` makes it absent.
    #[must_use]
    pub fn maybe_fragment(mut self, fragment: Option<impl Into<String>>) -> Self {
        self.parts.fragment = fragment.map(Into::into);
        self
    }

    /// Snapshots the current state into an immutable [`Uri`].
    ///
    /// The snapshot owns its own copies of every field, including the
    /// query multimap; later mutation of this builder never changes a
    /// previously taken snapshot.
    #[must_use]
    pub fn to_immutable(&self) -> Uri {
        Uri::from_parts(self.parts.clone())
    }
}

impl fmt::Display for UriBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical_string(
            self.parts.scheme.as_deref(),
            self.parts.user_info.as_deref(),
            self.parts.host.as_deref(),
            self.parts.port,
            self.parts.path.as_deref(),
            self.parts.query.as_ref(),
            self.parts.fragment.as_deref(),
        ))
    }
}

impl FromStr for UriBuilder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&Uri> for UriBuilder {
    fn from(uri: &Uri) -> Self {
        Self {
            parts: uri.clone().into_parts(),
        }
    }
}

impl From<Uri> for UriBuilder {
    fn from(uri: Uri) -> Self {
        Self {
            parts: uri.into_parts(),
        }
    }
}
