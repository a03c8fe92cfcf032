//! UTF-16 code-unit position math.
//!
//! Every position and length in the engine is counted in UTF-16 code units,
//! not in chars or grapheme clusters. Splitting goes through a `Vec<u16>`
//! buffer and [`String::from_utf16_lossy`], so an offset landing inside a
//! surrogate pair degrades to U+FFFD on each side instead of panicking and
//! the unit count of the two halves still adds up.
//!
//! Grapheme clusters matter in exactly one place, single-unit backspace,
//! which is what [`grapheme_at`] exists for.

use unicode_segmentation::UnicodeSegmentation;

/// Number of UTF-16 code units in `s`.
///
/// # Examples
///
/// ```
/// use scribe_core::utf16;
///
/// assert_eq!(utf16::len("Hello"), 5);
/// assert_eq!(utf16::len("👨‍👨‍👧‍👧"), 11);
/// ```
pub fn len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn from_units(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Split `s` at unit offset `at`. Offsets past the end clamp.
pub fn split_at(s: &str, at: usize) -> (String, String) {
    let u = units(s);
    let at = at.min(u.len());
    (from_units(&u[..at]), from_units(&u[at..]))
}

/// The tail of `s` starting at unit offset `from`.
pub fn slice_from(s: &str, from: usize) -> String {
    let u = units(s);
    let from = from.min(u.len());
    from_units(&u[from..])
}

/// The grapheme cluster covering unit offset `at`, if any.
///
/// # Examples
///
/// ```
/// use scribe_core::utf16;
///
/// assert_eq!(utf16::grapheme_at("Hi 👨‍👨‍👧‍👧!", 5), Some("👨‍👨‍👧‍👧"));
/// assert_eq!(utf16::grapheme_at("Hi", 7), None);
/// ```
pub fn grapheme_at(s: &str, at: usize) -> Option<&str> {
    let mut pos = 0usize;
    for g in s.graphemes(true) {
        let l = len(g);
        if at < pos + l {
            return Some(g);
        }
        pos += l;
    }
    None
}
