//! Ordered-list numbering systems.

use crate::ir::nodes::NumberingStyle;

/// Render `n` in the given numbering style.
///
/// Letters use bijective base 26 (1 → a, 26 → z, 27 → aa) and fall back to decimal below 1.
/// Roman numerals cover 1–3999 and fall back to decimal outside that range.
pub fn number(n: i64, style: NumberingStyle) -> String {
    match style {
        NumberingStyle::Decimal => n.to_string(),
        NumberingStyle::LowerAlpha => alpha(n).unwrap_or_else(|| n.to_string()),
        NumberingStyle::UpperAlpha => alpha(n)
            .map(|s| s.to_ascii_uppercase())
            .unwrap_or_else(|| n.to_string()),
        NumberingStyle::LowerRoman => roman(n).unwrap_or_else(|| n.to_string()),
        NumberingStyle::UpperRoman => roman(n)
            .map(|s| s.to_ascii_uppercase())
            .unwrap_or_else(|| n.to_string()),
    }
}

/// Bijective base-26 in lowercase letters.
pub fn alpha(n: i64) -> Option<String> {
    if n < 1 {
        return None;
    }
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).ok()
}

/// Lowercase Roman numerals for 1–3999.
pub fn roman(n: i64) -> Option<String> {
    const NUMERALS: [(i64, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if !(1..=3999).contains(&n) {
        return None;
    }
    let mut n = n;
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    Some(out)
}
