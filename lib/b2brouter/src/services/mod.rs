//! Endpoint services built on the [`ApiResource`](crate::ApiResource) pipeline.
//!
//! Services borrow the client's pipeline and only compose paths; every call
//! goes through [`ApiResource::request`](crate::ApiResource::request) or
//! [`ApiResource::request_binary`](crate::ApiResource::request_binary).

mod contacts;
mod format;
mod invoices;

use std::fmt::Display;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub use contacts::Contacts;
pub use format::DocumentFormat;
pub use invoices::Invoices;

/// Characters escaped in a path segment; unreserved characters stay as-is.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Percent-encode a value for use as a single path segment.
pub(crate) fn segment(value: impl Display) -> String {
    utf8_percent_encode(&value.to_string(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_segments_are_unchanged() {
        assert_eq!(segment(42), "42");
        assert_eq!(segment("inv-2025_01.a~b"), "inv-2025_01.a~b");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segment("a b?c#d"), "a%20b%3Fc%23d");
        assert_eq!(segment("100%"), "100%25");
    }
}
