// French typography for OCR text: narrow no-break spaces around
// guillemets and high punctuation, real ellipsis characters.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NARROW_NBSP: char = '\u{202F}';

static AFTER_OPEN_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"«[ \u{00A0}\u{202F}]*").expect("open quote pattern is valid"));

static BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \u{00A0}\u{202F}]*[;:!?»]").expect("punctuation pattern is valid"));

/// Replace whatever spacing precedes `; : ! ? »` with a narrow no-break
/// space. Punctuation opening the text is left alone.
fn normalize_space_before_punct(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in BEFORE_PUNCT_RE.find_iter(text) {
        if m.start() == 0 {
            result.push_str(&text[last..m.end()]);
        } else {
            result.push_str(&text[last..m.start()]);
            result.push(NARROW_NBSP);
            if let Some(punct) = m.as_str().chars().last() {
                result.push(punct);
            }
        }
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}

/// Normalize French typography. Idempotent; straight quotes and
/// apostrophes are kept as printed.
pub fn normalize_french_typography(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Decode first so "&amp;" never becomes "&\u{202F};"
    let text = text.replace("&amp;", "&");
    let text = text.replace("...", "…");
    let open_quote = format!("«{NARROW_NBSP}");
    let text = AFTER_OPEN_QUOTE_RE.replace_all(&text, open_quote.as_str());
    normalize_space_before_punct(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_punctuation() {
        assert_eq!(normalize_french_typography("Attention!"), "Attention\u{202F}!");
        assert_eq!(normalize_french_typography("Pourquoi ?"), "Pourquoi\u{202F}?");
        assert_eq!(normalize_french_typography("Film : titre"), "Film\u{202F}: titre");
        assert_eq!(normalize_french_typography("Oui\u{00A0};"), "Oui\u{202F};");
    }

    #[test]
    fn test_guillemets() {
        assert_eq!(
            normalize_french_typography("«Bonjour»"),
            "«\u{202F}Bonjour\u{202F}»"
        );
        assert_eq!(
            normalize_french_typography("« Bonjour »"),
            "«\u{202F}Bonjour\u{202F}»"
        );
    }

    #[test]
    fn test_ellipsis_and_entities() {
        assert_eq!(normalize_french_typography("Un titre..."), "Un titre…");
        assert_eq!(normalize_french_typography("A &amp; B;"), "A & B\u{202F};");
    }

    #[test]
    fn test_leading_punctuation_untouched() {
        assert_eq!(normalize_french_typography("!Alerte"), "!Alerte");
        assert_eq!(normalize_french_typography(""), "");
    }

    #[test]
    fn test_is_idempotent() {
        for sample in ["«\u{202F}Bonjour\u{202F}»", "Quoi ?! Non...", "A &amp; B : « C »"] {
            let once = normalize_french_typography(sample);
            assert_eq!(normalize_french_typography(&once), once);
        }
    }
}
