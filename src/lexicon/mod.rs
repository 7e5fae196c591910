// Lexicon matcher: the deterministic short-circuit signal.
//
// The lexicon is loaded once at startup (built-in list or an override file)
// and is read-only afterwards. Every term's pattern is compiled at load time,
// so a malformed term fails startup instead of a request.

pub mod matcher;
pub mod terms;

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

pub use matcher::LexiconEntry;

/// The static set of disallowed terms, in lexicon order.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon from canonical terms. Terms are lower-cased and
    /// de-duplicated, keeping the first occurrence's position.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for raw in terms {
            let entry = LexiconEntry::new(raw.as_ref())?;
            if seen.insert(entry.term().to_string()) {
                entries.push(entry);
            }
        }

        if entries.is_empty() {
            anyhow::bail!("Lexicon contains no terms");
        }

        Ok(Self { entries })
    }

    /// The built-in Creole term list.
    pub fn builtin() -> Result<Self> {
        Self::from_terms(terms::DEFAULT_TERMS.iter().copied())
    }

    /// Parse a lexicon file: one term per line, blank lines and lines
    /// starting with `#` ignored.
    pub fn parse(contents: &str) -> Result<Self> {
        let lines = contents
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let mut terms = Vec::new();
        for (line_no, line) in lines {
            // Validate here so the error can carry the line number.
            LexiconEntry::new(line).with_context(|| format!("Invalid lexicon entry on line {line_no}"))?;
            terms.push(line);
        }

        Self::from_terms(terms)
    }

    /// Load a lexicon override file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let lexicon = Self::parse(&contents)
            .with_context(|| format!("Failed to parse lexicon file {}", path.display()))?;
        info!(terms = lexicon.len(), path = %path.display(), "Loaded lexicon");
        Ok(lexicon)
    }

    /// Load from `path` if given, otherwise the built-in list.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(LexiconEntry::term)
    }

    /// Every term found in `text`, in lexicon order. Empty means no match.
    ///
    /// Intended for the matching form of normalized text, but case and
    /// punctuation don't change the result for well-formed terms.
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let matches: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.is_match(text))
            .map(|entry| entry.term().to_string())
            .collect();

        if !matches.is_empty() {
            debug!(
                matched = ?matches,
                text_preview = %crate::output::truncate_chars(text, 50),
                "Lexicon match"
            );
        }

        matches
    }
}
