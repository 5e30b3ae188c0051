//! Word-boundary cursor arithmetic
//!
//! Word boundaries are the characters `.`, `[` and `]`, which is what makes
//! `Ctrl+Left`/`Ctrl+Right` hop between the segments of a path like
//! `.users[0].name`. All positions are character indices.
//!
//! The two searches are deliberately asymmetric: the backward search lands
//! just *after* a boundary, the forward search lands *on* it.
//!
//! ```
//! use reqtui::text::navigator::{find_next_boundary, find_previous_boundary};
//!
//! assert_eq!(find_previous_boundary(".a.b[0]", 7), 7);
//! assert_eq!(find_previous_boundary(".a.b[0]", 4), 3);
//! assert_eq!(find_next_boundary(".a.b[0]", 1), 2);
//! ```

/// Characters that separate words in filter and query text
pub const BOUNDARY_CHARS: [char; 3] = ['.', '[', ']'];

/// Check whether a character is a word boundary
#[must_use]
pub fn is_boundary(c: char) -> bool {
    BOUNDARY_CHARS.contains(&c)
}

/// Find the start of the word that ends at `pos`
///
/// Scans backward from `pos - 1`. When a boundary is found at index `i` the
/// result is `i + 1`, except for a boundary at index 0 which yields 0. Without
/// any boundary the result is 0.
#[must_use]
pub fn find_previous_boundary(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let start = pos.min(chars.len());

    for i in (0..start).rev() {
        if is_boundary(chars[i]) {
            return if i == 0 { 0 } else { i + 1 };
        }
    }

    0
}

/// Find the next boundary at or after `pos`
///
/// Returns the index of the boundary character itself, or the text length
/// (in characters) when there is none.
#[must_use]
pub fn find_next_boundary(text: &str, pos: usize) -> usize {
    let len = text.chars().count();
    text.chars()
        .enumerate()
        .skip(pos)
        .find(|(_, c)| is_boundary(*c))
        .map_or(len, |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_boundary_after_closing_bracket() {
        assert_eq!(find_previous_boundary(".a.b[0]", 7), 7);
    }

    #[test]
    fn test_previous_boundary_inside_word() {
        // ".users.name" cursor after "na"
        assert_eq!(find_previous_boundary(".users.name", 9), 7);
        // The leading dot sits at index 0, which collapses to 0
        assert_eq!(find_previous_boundary(".users.name", 3), 0);
    }

    #[test]
    fn test_previous_boundary_at_index_zero() {
        assert_eq!(find_previous_boundary(".", 1), 0);
        assert_eq!(find_previous_boundary("[x", 2), 0);
    }

    #[test]
    fn test_previous_boundary_without_boundary() {
        assert_eq!(find_previous_boundary("length", 4), 0);
        assert_eq!(find_previous_boundary("", 0), 0);
    }

    #[test]
    fn test_previous_boundary_clamps_position() {
        assert_eq!(find_previous_boundary("a.b", 99), 2);
    }

    #[test]
    fn test_next_boundary() {
        assert_eq!(find_next_boundary(".a.b[0]", 0), 0);
        assert_eq!(find_next_boundary(".a.b[0]", 1), 2);
        assert_eq!(find_next_boundary(".a.b[0]", 3), 4);
        assert_eq!(find_next_boundary(".a.b[0]", 5), 6);
    }

    #[test]
    fn test_next_boundary_without_boundary() {
        assert_eq!(find_next_boundary("keys", 1), 4);
        assert_eq!(find_next_boundary("a.b", 10), 3);
    }

    #[test]
    fn test_boundaries_are_asymmetric() {
        let text = ".a.bc";
        let prev = find_previous_boundary(text, 4);
        assert_eq!(prev, 3);
        assert_eq!(find_next_boundary(text, prev), 5);
    }

    #[test]
    fn test_multibyte_positions_are_char_indices() {
        assert_eq!(find_previous_boundary(".é.ü", 4), 3);
        assert_eq!(find_next_boundary(".é.ü", 1), 2);
    }
}
