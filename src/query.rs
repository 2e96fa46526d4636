//! Ordered query multimap for URIs.

use std::fmt;
use std::str::FromStr;

use crate::codec::{self, Component};
use crate::error::DecodeError;

/// An ordered multimap of query parameters.
///
/// Keys iterate in the order they were first observed (parse) or first
/// inserted (build); values within a key keep their own insertion order.
/// A parameter may carry no value at all (a flag, e.g. `...&verbose&...`),
/// which is distinct from an empty-string value (`...&verbose=&...`).
///
/// Names and values are stored decoded and percent-encoded on display.
///
/// # Examples
///
/// ```
/// use flex_uri::QueryMap;
///
/// let mut query = QueryMap::new();
/// query.put("a", Some("1"));
/// query.put("a", Some("2"));
/// query.put("verbose", None::<&str>);
/// assert_eq!(query.to_string(), "a=1&a=2&verbose");
/// assert_eq!(query.get_first("a"), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryMap {
    entries: Vec<(String, Vec<Option<String>>)>,
}

impl QueryMap {
    /// Creates an empty query map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query parameters from a raw query string (without leading `?`).
    ///
    /// Entries are split on `&`, each entry on its first `=`; names and
    /// values are percent-decoded independently. An entry without `=` is a
    /// flag; an entry with `=` and nothing after it is an empty-string
    /// value. Empty entries (`a=1&&b=2`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if a name or value is not validly
    /// percent-encoded.
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        let mut map = Self::new();

        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (name, value) = match pair.find('=') {
                Some(eq_idx) => (&pair[..eq_idx], Some(&pair[eq_idx + 1..])),
                None => (pair, None),
            };

            let name = codec::decode(name)?;
            let value = value.map(codec::decode).transpose()?;
            map.put(name, value);
        }

        Ok(map)
    }

    /// Appends a value (or a flag, for `None`) for `name`.
    ///
    /// Existing entries for `name` and for other names are untouched;
    /// repeated calls build multi-valued parameters.
    pub fn put(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        let name = name.into();
        let value = value.map(Into::into);
        if let Some((_, values)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            values.push(value);
        } else {
            self.entries.push((name, vec![value]));
        }
    }

    /// Returns the first-inserted value for `name`.
    ///
    /// Returns `None` when the name is unseen or its first entry is a flag.
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get_all(name)?.first()?.as_deref()
    }

    /// Returns all values for `name` in insertion order, or `None` if the
    /// name is unseen. Flag entries appear as `None` in the slice.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns true if the map contains `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Returns the parameter names in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Returns an iterator over `(name, values)` pairs in key order.
    pub fn iter(&self) -> QueryIter<'_> {
        QueryIter {
            inner: self.entries.iter(),
        }
    }

    /// Removes all values for `name`.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Returns true if the map holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Iterator over a [`QueryMap`]'s `(name, values)` pairs in key order.
#[derive(Debug, Clone)]
pub struct QueryIter<'a> {
    inner: std::slice::Iter<'a, (String, Vec<Option<String>>)>,
}

impl<'a> Iterator for QueryIter<'a> {
    type Item = (&'a str, &'a [Option<String>]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for QueryIter<'_> {}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a str, &'a [Option<String>]);
    type IntoIter = QueryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, values) in &self.entries {
            for value in values {
                if !first {
                    f.write_str("&")?;
                }
                first = false;
                f.write_str(&codec::encode(name, Component::QueryKey))?;
                if let Some(value) = value {
                    f.write_str("=")?;
                    f.write_str(&codec::encode(value, Component::QueryValue))?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for QueryMap {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
