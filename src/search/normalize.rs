//! Accent- and case-insensitive text normalization

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching.
///
/// Blank input (empty or whitespace only) yields an empty string. Anything
/// else is canonically decomposed, stripped of combining marks, recomposed
/// and lower-cased with the locale-independent Unicode mapping. The text is
/// not trimmed.
///
/// ```
/// use artisan_order_manager::search::normalize;
///
/// assert_eq!(normalize("Ñandú"), normalize("nandu"));
/// assert_eq!(normalize("ÁRBOL"), "arbol");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // ASCII has no marks to strip.
    if text.is_ascii() {
        return text.to_ascii_lowercase();
    }

    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    if stripped.trim().is_empty() {
        return String::new();
    }
    stripped.nfc().collect::<String>().to_lowercase()
}
