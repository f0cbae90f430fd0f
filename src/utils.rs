/*!
 * Path normalization and ordering helpers for bctx
 */

use std::cmp::Ordering;
use std::path::{Path, MAIN_SEPARATOR};

/// Punctuation in collation order, matching the root locale's ordering for
/// the characters that commonly appear in file paths.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Convert platform separators to forward slashes
pub fn to_posix(value: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        value.to_string()
    } else {
        value.replace(MAIN_SEPARATOR, "/")
    }
}

/// Convert a path to its forward-slash string form
pub fn path_to_posix(path: &Path) -> String {
    to_posix(&path.to_string_lossy())
}

/// Normalize a root-relative path: forward slashes, no leading `./`
pub fn normalize_relative(relative: &str) -> String {
    let normalized = to_posix(relative);
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Split NUL-delimited tool output into trimmed, non-empty entries
pub fn parse_null_separated(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .split('\0')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Base letter of an accented Latin-1 or Latin Extended-A lowercase letter.
///
/// Other characters are returned unchanged and sort by code point after `z`.
fn fold_diacritic(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

/// Primary collation weight of a character: class first, then position.
///
/// Accented Latin letters share the weight of their base letter, so `é`
/// sits next to `e` rather than after `z`.
fn primary_weight(c: char) -> (u8, u32) {
    if let Some(index) = PUNCTUATION_ORDER.find(c) {
        return (0, index as u32);
    }
    if c.is_whitespace() {
        return (0, 0);
    }
    if c.is_ascii_digit() {
        return (2, c as u32);
    }
    if c.is_alphabetic() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        return (3, fold_diacritic(lower) as u32);
    }
    (1, c as u32)
}

/// Accent weight: zero for unaccented characters.
fn secondary_weight(c: char) -> u32 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    if fold_diacritic(lower) == lower {
        0
    } else {
        lower as u32
    }
}

/// Locale-style comparison of two relative paths.
///
/// Characters are compared case- and accent-insensitively first
/// (punctuation, then digits, then letters). Ties are broken by accents
/// with plain letters first, then by case with lowercase ordered before
/// uppercase, and finally by code point so the order is total.
pub fn compare_relative(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .chars()
        .map(secondary_weight)
        .cmp(b.chars().map(secondary_weight));
    if secondary != Ordering::Equal {
        return secondary;
    }

    for (left, right) in a.chars().zip(b.chars()) {
        if left == right {
            continue;
        }
        if left.is_lowercase() && right.is_uppercase() {
            return Ordering::Less;
        }
        if left.is_uppercase() && right.is_lowercase() {
            return Ordering::Greater;
        }
    }

    a.cmp(b)
}
