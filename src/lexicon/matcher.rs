// Obfuscation-tolerant pattern for a single lexicon term.
//
// "pilon" compiles to `(?i)\bp+\s*i+\s*l+\s*o+\s*n+\b`: every letter may
// repeat, any amount of whitespace may sit between letters, and the whole
// thing must be isolated by word boundaries on both ends.
//
// Boundaries are Unicode word boundaries, so an accented letter glued to the
// term ("pilonné") keeps it from matching, the same as an ASCII letter would.

use anyhow::{Context, Result};
use regex::Regex;

/// One canonical disallowed term with its precompiled pattern.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    term: String,
    pattern: Regex,
}

impl LexiconEntry {
    /// Validate and compile a canonical term.
    ///
    /// The term is folded to lower case. It must contain at least one
    /// character, and only letters, digits and inner whitespace.
    pub fn new(raw: &str) -> Result<Self> {
        let term = raw.trim().to_lowercase();

        if term.is_empty() {
            anyhow::bail!("Lexicon term is empty");
        }
        if let Some(bad) = term
            .chars()
            .find(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            anyhow::bail!("Lexicon term {:?} contains invalid character {:?}", raw, bad);
        }

        let pattern = Regex::new(&obfuscation_pattern(&term))
            .with_context(|| format!("Failed to compile pattern for lexicon term {:?}", raw))?;

        Ok(Self { term, pattern })
    }

    /// The canonical (lower-cased) spelling.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether this term occurs in `text`, allowing for letter repetition
    /// and inserted whitespace.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Build the regex source for a term. Whitespace inside the term is skipped;
/// the `\s*` separators already tolerate it.
pub fn obfuscation_pattern(term: &str) -> String {
    let body = term
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| format!("{}+", regex::escape(&c.to_string())))
        .collect::<Vec<_>>()
        .join(r"\s*");

    format!(r"(?i)\b{body}\b")
}
