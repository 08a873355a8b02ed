//! String canonicalization for duplicate checks and weighting.

/// Normalize a string for comparison or processing.
///
/// - Trims leading/trailing whitespace
/// - Collapses internal whitespace runs to a single ASCII space
/// - Lowercases
/// - Maps full-width Latin letters and digits to their half-width ASCII
///   equivalents
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`. The result is
/// never shown to end users; it only feeds duplicate detection and the
/// weight calculation.
///
/// # Examples
/// ```
/// use qgen::normalize::normalize;
///
/// assert_eq!(normalize("  Hello   World  "), "hello world");
/// assert_eq!(normalize("１２３ＡＢＣａｂｃ"), "123abcabc");
/// ```
pub fn normalize(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase().chars().map(to_halfwidth).collect()
}

// Full-width Latin letters and digits sit at a fixed 0xFEE0 offset from
// their ASCII counterparts.
fn to_halfwidth(c: char) -> char {
    match c {
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => {
            char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
        }
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_trim_and_collapse() {
        assert_eq!(normalize("  Hello   World  "), "hello world");
        assert_eq!(normalize("a\t\tb\n c"), "a b c");
    }

    #[test]
    fn test_full_width_mapping() {
        assert_eq!(normalize("１２３ＡＢＣａｂｃ"), "123abcabc");
    }

    #[test]
    fn test_mixed_input() {
        assert_eq!(normalize("  Full  Ｗｉｄｔｈ  123  "), "full width 123");
    }

    #[test]
    fn test_idempotent() {
        for s in ["  Hello   World  ", "１２３ＡＢＣ", "tokyo", "ＴＯＫＹＯ 駅"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_non_latin_text_passes_through() {
        assert_eq!(normalize("東京"), "東京");
    }
}
