// Lexicon matcher tests: obfuscation tolerance and word boundaries,
// run through the same normalization a real request gets.

use kreolguard::lexicon::matcher::LexiconEntry;
use kreolguard::lexicon::Lexicon;
use kreolguard::normalize::normalize;

fn builtin_matches(raw: &str) -> Vec<String> {
    let lexicon = Lexicon::builtin().unwrap();
    lexicon.find_matches(&normalize(raw))
}

#[test]
fn canonical_term_matches() {
    assert_eq!(builtin_matches("bourik"), vec!["bourik"]);
    assert_eq!(builtin_matches("Bourik!"), vec!["bourik"]);
}

#[test]
fn repeated_letters_match() {
    assert_eq!(builtin_matches("piiilllllooonnn"), vec!["pilon"]);
    assert_eq!(builtin_matches("BOURIIIIK"), vec!["bourik"]);
}

#[test]
fn spaced_and_punctuated_letters_match() {
    assert_eq!(builtin_matches("p.i.l.o.n"), vec!["pilon"]);
    assert!(builtin_matches("b o u r i k").contains(&"bourik".to_string()));
}

#[test]
fn terms_next_to_punctuation_match() {
    assert_eq!(builtin_matches("pilon,bourik"), vec!["bourik", "pilon"]);
    assert_eq!(builtin_matches("to enn bourik-la"), vec!["bourik"]);
    assert_eq!(builtin_matches("l'pilon"), vec!["pilon"]);
    assert_eq!(builtin_matches("zako/bourik"), vec!["bourik", "zako"]);
    assert_eq!(builtin_matches("ou enn bourik.zako"), vec!["bourik", "zako"]);
}

#[test]
fn emoji_between_words_do_not_hide_terms() {
    assert_eq!(builtin_matches("to enn 😡 bourik 😡"), vec!["bourik"]);
}

#[test]
fn terms_inside_longer_words_do_not_match() {
    assert!(builtin_matches("pilonaire").is_empty());
    assert!(builtin_matches("lapilon").is_empty());
    assert!(builtin_matches("pilonné").is_empty());
}

#[test]
fn clean_text_has_no_match() {
    assert!(builtin_matches("You are a wonderful person").is_empty());
    assert!(builtin_matches("Bonzour, ki manier? Mo kontan twa.").is_empty());
    assert!(builtin_matches("").is_empty());
}

#[test]
fn every_builtin_term_matches_itself() {
    let lexicon = Lexicon::builtin().unwrap();
    for term in lexicon.terms() {
        let hits = lexicon.find_matches(&normalize(term));
        assert!(
            hits.iter().any(|h| h == term),
            "{term:?} does not match its own normalized form"
        );
    }
}

#[test]
fn custom_lexicon_file_format() {
    let lexicon = Lexicon::parse("# test list\nzako\n\n  Kouyon \nzako\n").unwrap();
    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.terms().collect::<Vec<_>>(), vec!["zako", "kouyon"]);
    assert_eq!(
        lexicon.find_matches(&normalize("Kouuuyon ek zzzako")),
        vec!["zako", "kouyon"]
    );
}

#[test]
fn invalid_entries_are_rejected() {
    assert!(LexiconEntry::new("   ").is_err());
    assert!(LexiconEntry::new("a.b").is_err());
    let err = Lexicon::parse("zako\nbad*term\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn empty_lexicon_is_rejected() {
    assert!(Lexicon::parse("# nothing here\n\n").is_err());
}
