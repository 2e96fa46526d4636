//! Pragmatic parser and fluent builder for HTTP-style URIs.
//!
//! This crate offers two cooperating representations of a URI:
//!
//! - [`Uri`], an immutable, parsed snapshot of scheme, user-info, host,
//!   port, path, query multimap, and fragment.
//! - [`UriBuilder`], a mutable accumulator over the same fields, built
//!   from scratch, from a string, or from an existing [`Uri`], and
//!   materialized back into a canonical string or a [`Uri`].
//!
//! Every field is optional, and absence is a first-class state distinct
//! from an empty string or port zero. Percent-decoding happens once at
//! parse time, encoding once at output time; host and path pass through
//! raw.
//!
//! This is an application-level URI toolkit, not a general RFC 3986
//! resolver: IPv6 literal hosts, dot-segment normalization, and
//! scheme-specific defaulting are out of scope.
//!
//! # Quick Start
//!
//! ```rust
//! use flex_uri::{Uri, UriBuilder};
//!
//! // Parse a URI
//! let uri = Uri::parse("http://localhost:8080/?a=1&b=2#frag").unwrap();
//! assert_eq!(uri.host(), Some("localhost"));
//! assert_eq!(uri.port(), Some(8080));
//! assert_eq!(uri.query_first("a"), Some("1"));
//!
//! // Derive, mutate, and re-materialize
//! let updated = UriBuilder::from_uri(&uri)
//!     .scheme("https")
//!     .clear_fragment()
//!     .query("b", "3")
//!     .to_string();
//! assert_eq!(updated, "https://localhost:8080/?a=1&b=2&b=3");
//! ```
//!
//! # Builder Pattern
//!
//! Setters consume and return the builder for fluent chaining; query
//! parameters accumulate rather than overwrite:
//!
//! ```rust
//! use flex_uri::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .scheme("http")
//!     .host("localhost")
//!     .path("/api")
//!     .rel("items")
//!     .query("page", "2")
//!     .query_flag("verbose")
//!     .to_immutable();
//!
//! assert_eq!(uri.to_string(), "http://localhost/api/items?page=2&verbose");
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod codec;
mod error;
mod parse;
pub mod prelude;
mod query;
mod uri;

pub use builder::UriBuilder;
pub use codec::{Component, decode, encode};
pub use error::{DecodeError, ParseError, ParseErrorKind};
pub use query::{QueryIter, QueryMap};
pub use uri::Uri;
