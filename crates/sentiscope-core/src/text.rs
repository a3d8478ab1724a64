#![forbid(unsafe_code)]

//! Display-text normalization for captured posts.
//!
//! Exports frequently store post bodies as the `repr` of a byte string
//! (`b'...'` or `b"..."`), sometimes split across several fragments. This
//! module strips that wrapper and joins fragments into one line of text.
//!
//! Inputs shorter than the wrapper are well-defined: the two-character marker
//! alone (`b'`) and the marker plus a single character (`b'x`) both normalize
//! to the empty string, and one-character inputs are returned unchanged.

use crate::post::RawText;

const MARKERS: [&str; 2] = ["b'", "b\""];

/// Normalize a single fragment.
///
/// A leading `b'` or `b"` marker is removed together with the final
/// character (the closing quote). Anything else is returned unchanged.
#[must_use]
pub fn normalize_fragment(fragment: &str) -> String {
    let Some(rest) = MARKERS
        .iter()
        .find_map(|marker| fragment.strip_prefix(marker))
    else {
        return fragment.to_string();
    };

    // Drop the last char on a char boundary; an empty remainder stays empty.
    let end = rest.char_indices().last().map_or(0, |(i, _)| i);
    rest[..end].to_string()
}

/// Normalize a raw captured field into display text.
///
/// Fragments are normalized independently and joined with a single space,
/// preserving their order.
#[must_use]
pub fn normalize(raw: &RawText) -> String {
    match raw {
        RawText::Single(text) => normalize_fragment(text),
        RawText::Fragments(parts) => parts
            .iter()
            .map(|part| normalize_fragment(part))
            .collect::<Vec<_>>()
            .join(" "),
    }
}
