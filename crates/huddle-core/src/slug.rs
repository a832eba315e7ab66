//! URL-safe slugs derived from display text.
//!
//! A slug is a pure function of its input: the same text always yields the
//! same slug, so editing a name back and forth lands on the same URL.

/// Characters removed outright rather than turned into a separator, so
/// "What's" becomes "whats" instead of "what-s".
const ELIDED: [char; 3] = ['\'', '\u{2019}', '"'];

/// Generate a lowercase, hyphen-separated slug from `text`.
///
/// ASCII letters and digits are kept; every other run of characters becomes
/// a single `-`. Leading and trailing separators are trimmed. Text with no
/// ASCII alphanumerics produces an empty slug.
///
/// There is no transliteration, so non-ASCII letters are lossy: "Café Quiz"
/// becomes `caf-quiz` and "Über" becomes `ber`.
pub fn generate(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if ELIDED.contains(&c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
