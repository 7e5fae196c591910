// Text normalization: the first stage of every moderation request.
//
// Two policies live here:
// - `normalize` is the matching policy: emoji stripped, lower-cased, every
//   character that is not a letter or digit turned into a word break, runs of
//   breaks collapsed to single spaces and trimmed. The lexicon's obfuscation
//   tolerance is defined against this form, so it must stay stable.
// - `sentence_case` is the display policy: emoji stripped, lower-cased, then
//   the first letter of each sentence capitalized. Punctuation survives, which
//   is what the remote signals and the audit log want to see.

use std::sync::OnceLock;

use regex::Regex;

/// Emoji and pictographic symbols, plus the joiners and variation selectors
/// that glue multi-codepoint emoji together.
fn emoji_regex() -> &'static Regex {
    static EMOJI_REGEX: OnceLock<Regex> = OnceLock::new();
    EMOJI_REGEX.get_or_init(|| {
        Regex::new(r"[\p{Emoji_Presentation}\p{Extended_Pictographic}\x{200D}\x{FE0F}]")
            .expect("valid emoji pattern")
    })
}

/// A request's text after normalization. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Matching form: what the lexicon sees.
    pub matching: String,
    /// Sentence-cased display form: what the signal clients and audit log see.
    pub display: String,
}

impl NormalizedText {
    /// Run both normalization policies over the raw input.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            matching: normalize(raw),
            display: sentence_case(raw),
        }
    }

    /// True when nothing usable survived normalization.
    pub fn is_empty(&self) -> bool {
        self.matching.is_empty()
    }
}

/// Remove emoji and pictographic code points.
pub fn strip_emoji(text: &str) -> String {
    emoji_regex().replace_all(text, "").into_owned()
}

/// Matching normalization. Total: never fails, empty in → empty out.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_emoji(raw);

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;

    for ch in stripped.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        } else {
            // Punctuation separates words just like whitespace does, so
            // "bourik-la" keeps "bourik" whole.
            pending_space = !out.is_empty();
        }
    }

    out
}

/// Display normalization: emoji stripped, trimmed, lower-cased, and the first
/// letter at the start of the text or after `.`/`!`/`?` plus whitespace
/// upper-cased. Works per Unicode letter, so "été. à bientôt" becomes
/// "Été. À bientôt".
pub fn sentence_case(raw: &str) -> String {
    let stripped = strip_emoji(raw);
    let lowered = stripped.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    // Only whitespace may sit between the sentence boundary and the letter
    // that gets capitalized; anything else cancels it.
    let mut capitalize_next = true;
    let mut after_terminator = false;

    for ch in lowered.chars() {
        if ch.is_alphabetic() {
            if capitalize_next {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            capitalize_next = false;
            after_terminator = false;
            continue;
        }

        match ch {
            '.' | '!' | '?' => {
                capitalize_next = false;
                after_terminator = true;
            }
            c if c.is_whitespace() => {
                if after_terminator {
                    capitalize_next = true;
                }
            }
            _ => {
                capitalize_next = false;
                after_terminator = false;
            }
        }

        out.push(ch);
    }

    out
}
