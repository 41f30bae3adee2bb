//! Identifier case conversion between Rust-side snake_case and the API's
//! camelCase wire format.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An uppercase run followed by a capitalized word (`IDNot` -> `ID_Not`).
    static ref ACRONYM_BOUNDARY: Regex = Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap();
    /// A lowercase letter or digit followed by an uppercase letter (`rI` -> `r_I`).
    static ref WORD_BOUNDARY: Regex = Regex::new(r"([a-z\d])([A-Z])").unwrap();
}

/// Rewrites a snake_case key as lower camelCase.
///
/// An underscore followed by an ASCII alphanumeric character is dropped and
/// the character upper-cased. Any other underscore is kept, so keys that are
/// already camelCase come back unchanged.
///
/// ## Examples
///
/// ```
/// use warrant::case::camelize;
///
/// assert_eq!(camelize("object_type"), "objectType");
/// assert_eq!(camelize("objectType"), "objectType");
/// assert_eq!(camelize("_private"), "_private");
/// ```
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' && !out.is_empty() {
            if let Some(next) = chars.peek().copied() {
                if next.is_ascii_alphanumeric() {
                    chars.next();
                    out.push(next.to_ascii_uppercase());
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Rewrites a CamelCase identifier as snake_case.
///
/// Used on the `message` field of API errors, which the server sends as
/// a CamelCase token.
///
/// ## Examples
///
/// ```
/// use warrant::case::decamelize;
///
/// assert_eq!(decamelize("UserIDNotFound"), "user_id_not_found");
/// assert_eq!(decamelize("RecordAlreadyExists"), "record_already_exists");
/// ```
pub fn decamelize(s: &str) -> String {
    let s = ACRONYM_BOUNDARY.replace_all(s, "${1}_${2}");
    let s = WORD_BOUNDARY.replace_all(&s, "${1}_${2}");
    s.to_lowercase()
}
