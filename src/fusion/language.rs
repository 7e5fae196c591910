// Language routing: decides whether the classifier's vote counts.
//
// The judge reports languages as free text, usually a comma-joined list such
// as "creole, english". The rule:
//
// 1. Split on commas, trim, lower-case, drop empty tags.
// 2. A tag mentions Creole if it contains "creole", "kreol" or "morisien"
//    ("mauritian creole" and "kreol morisien" both count).
// 3. The text is routed as French/English only when there is at least one
//    tag, no tag mentions Creole, and every tag is exactly "french" or
//    "english". Everything else (Creole present, empty, "unknown", any other
//    language) routes to Creole, the catch-all category.

/// Reported language for anything not clearly French or English.
pub const CREOLE: &str = "creole";

const CREOLE_MARKERS: [&str; 3] = ["creole", "kreol", "morisien"];
const STANDARD_LANGUAGES: [&str; 2] = ["french", "english"];

/// Where a request goes after the judge has named its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRoute {
    /// Only French and/or English: the classifier wasn't trained for this,
    /// so the judge decides alone. Carries the language to report.
    Standard(String),
    /// Creole, mixed with Creole, or unclear: both signals are consulted.
    Creole,
}

impl LanguageRoute {
    /// The language string reported to the caller and the audit log.
    pub fn reported_language(&self) -> &str {
        match self {
            LanguageRoute::Standard(lang) => lang,
            LanguageRoute::Creole => CREOLE,
        }
    }

    pub fn skips_classifier(&self) -> bool {
        matches!(self, LanguageRoute::Standard(_))
    }
}

/// Split a judge language string into normalized tags.
pub fn language_tags(detected: &str) -> Vec<String> {
    detected
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn mentions_creole(tag: &str) -> bool {
    CREOLE_MARKERS.iter().any(|marker| tag.contains(marker))
}

/// Route a request based on the judge's detected language.
pub fn route(detected: &str) -> LanguageRoute {
    let tags = language_tags(detected);

    let standard_only = !tags.is_empty()
        && !tags.iter().any(|t| mentions_creole(t))
        && tags.iter().all(|t| STANDARD_LANGUAGES.contains(&t.as_str()));

    if standard_only {
        LanguageRoute::Standard(tags.join(", "))
    } else {
        LanguageRoute::Creole
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_routes_standard() {
        assert_eq!(route("english"), LanguageRoute::Standard("english".to_string()));
    }

    #[test]
    fn test_french_english_mix_routes_standard() {
        let r = route(" French ,English");
        assert_eq!(r, LanguageRoute::Standard("french, english".to_string()));
        assert!(r.skips_classifier());
    }

    #[test]
    fn test_creole_present_routes_creole() {
        assert_eq!(route("creole"), LanguageRoute::Creole);
        assert_eq!(route("creole, english"), LanguageRoute::Creole);
        assert_eq!(route("french, Mauritian Creole"), LanguageRoute::Creole);
        assert_eq!(route("kreol morisien"), LanguageRoute::Creole);
    }

    #[test]
    fn test_unclear_routes_creole() {
        assert_eq!(route(""), LanguageRoute::Creole);
        assert_eq!(route(" , "), LanguageRoute::Creole);
        assert_eq!(route("unknown"), LanguageRoute::Creole);
        assert_eq!(route("spanish"), LanguageRoute::Creole);
        assert_eq!(route("english, spanish"), LanguageRoute::Creole);
    }

    #[test]
    fn test_reported_language() {
        assert_eq!(route("english").reported_language(), "english");
        assert_eq!(route("unknown").reported_language(), "creole");
        assert!(!route("creole").skips_classifier());
    }
}
