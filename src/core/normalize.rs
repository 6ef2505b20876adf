//! Search-text normalization
//!
//! Stored names carry a parallel normalized rendering (diacritics stripped,
//! case folded, punctuation removed) so that a search for "Nguyễn" matches a
//! record stored as "NGUYEN VAN A". The same function is applied to both the
//! stored field and the incoming search term.

/// Diacritic fold groups. Each entry maps every character in the set to its
/// base letter. Covers the full Vietnamese precomposed range plus the common
/// Latin-1/Latin Extended-A letters.
const FOLDS: &[(&str, char)] = &[
    ("àáâãäåāăąạảấầẩẫậắằẳẵặ", 'a'),
    ("èéêëēĕėęěẹẻẽếềểễệ", 'e'),
    ("ìíîïĩīĭįıỉị", 'i'),
    ("òóôõöøōŏőọỏốồổỗộớờởỡợơ", 'o'),
    ("ùúûüũūŭůűųụủứừửữựư", 'u'),
    ("ýÿỳỵỷỹ", 'y'),
    ("đ", 'd'),
    ("çćĉċč", 'c'),
    ("ñńņňŉ", 'n'),
    ("śŝşš", 's'),
    ("ţťŧ", 't'),
    ("źżž", 'z'),
    ("ĝğġģ", 'g'),
    ("ĺļľŀł", 'l'),
    ("ŕŗř", 'r'),
];

/// Fold a single (already lowercased) character to its undecorated base.
fn fold_diacritics(c: char) -> char {
    for (set, base) in FOLDS {
        if set.contains(c) {
            return *base;
        }
    }
    c
}

/// Normalize a string for diacritic-insensitive search.
///
/// Lowercases, strips diacritics, drops everything that is not ASCII
/// alphanumeric or whitespace, and trims. A term consisting only of special
/// characters therefore normalizes to the empty string, which callers treat
/// as "fall back to raw-term matching".
pub fn normalize_search(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(fold_diacritics)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
