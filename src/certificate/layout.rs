//! Page geometry and text measurement for the certificate artifact.

/// A4 page size in points
pub(crate) const PAGE_WIDTH: f32 = 595.0;
pub(crate) const PAGE_HEIGHT: f32 = 842.0;
pub(crate) const MARGIN: f32 = 50.0;

/// Width available to wrapped text
pub(crate) const CONTENT_WIDTH: f32 = 495.0;

/// Advance width of a character in Helvetica, in 1/1000 em units.
/// Non-ASCII falls back to the average glyph width.
fn glyph_units(c: char) -> u32 {
    match c {
        '\'' => 191,
        'i' | 'j' | 'l' => 222,
        '|' => 260,
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | 'f' | 't' | 'I' | '[' | ']' | '\\' => 278,
        '(' | ')' | '-' | '`' | 'r' => 333,
        '{' | '}' => 334,
        '"' => 355,
        '*' => 389,
        '^' => 469,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        '#' | '$' | '0'..='9' | '?' | '_' | 'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o'
        | 'p' | 'q' | 'u' | 'L' => 556,
        '+' | '<' | '=' | '>' | '~' => 584,
        'F' | 'T' | 'Z' => 611,
        '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
        'G' | 'O' | 'Q' => 778,
        'm' | 'M' => 833,
        '%' => 889,
        'W' => 944,
        '@' => 1015,
        _ => 556,
    }
}

/// Width of a line of text at the given font size, in points
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(glyph_units).sum();
    units as f32 * size / 1000.0
}

/// Greedy word-packing line wrap against a fixed width.
///
/// Words are packed left to right; a word that alone exceeds `max_width`
/// is still emitted whole on its own line, never dropped.
pub(crate) fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();

    for word in words {
        let candidate = format!("{} {}", current, word);
        if text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_stays_on_one_line() {
        let lines = wrap_text("a short line", 12.0, CONTENT_WIDTH);
        assert_eq!(lines, vec!["a short line"]);
    }

    #[test]
    fn test_greedy_packing_breaks_at_width() {
        // each "word" is ~100pt wide at 12pt, so four fit per 495pt line
        let word = "MMMMMMMMMM"; // 10 x 833 units
        let text = vec![word; 6].join(" ");
        let lines = wrap_text(&text, 12.0, CONTENT_WIDTH);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![word; 4].join(" "));
        assert_eq!(lines[1], vec![word; 2].join(" "));
        for line in &lines {
            assert!(text_width(line, 12.0) <= CONTENT_WIDTH);
        }
    }

    #[test]
    fn test_oversized_word_is_emitted_whole() {
        let giant = "W".repeat(200);
        let lines = wrap_text(&format!("ok {} ok", giant), 12.0, CONTENT_WIDTH);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], giant);
    }

    #[test]
    fn test_hex_digest_is_a_single_word() {
        let digest = "d1c627ff5ecb73c384b004462aa74f8940918a1b39a704e35e46c2526c010640";
        let lines = wrap_text(digest, 9.0, CONTENT_WIDTH);
        assert_eq!(lines, vec![digest.to_string()]);
        // a 64-char digest fits the content width at the small size
        assert!(text_width(digest, 9.0) <= CONTENT_WIDTH);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 12.0, CONTENT_WIDTH), vec![String::new()]);
    }

    #[test]
    fn test_width_scales_with_size() {
        let w12 = text_width("sample", 12.0);
        let w24 = text_width("sample", 24.0);
        assert!((w24 - w12 * 2.0).abs() < 0.001);
    }
}
