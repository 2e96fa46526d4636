//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use flex_uri::prelude::*;
//!
//! let uri = Uri::parse("http://localhost:8080/?a=1").unwrap();
//! assert_eq!(uri.query_first("a"), Some("1"));
//! ```

pub use crate::{
    // Core types
    Component, QueryIter, QueryMap, Uri,
    // Builder
    UriBuilder,
    // Codec
    decode, encode,
    // Errors
    DecodeError, ParseError, ParseErrorKind,
};
