// Fusion policy: reconciles the lexicon, classifier and judge into a verdict.
//
// Order of precedence:
// 1. Any lexicon hit is final: unsafe, language "creole", signals discarded.
// 2. Language routing: French/English-only text skips the classifier and
//    takes the judge's label as-is.
// 3. Otherwise both signals vote. Agreement wins; disagreement goes to
//    human review instead of being broken by a tie rule.
//
// `decide` is pure and total. Transport failures were already replaced by
// the signals' `unavailable()` defaults before it runs.

pub mod language;
pub mod verdict;

use tracing::debug;

use crate::signals::traits::{ClassifierSignal, JudgeSignal, Label};
use language::CREOLE;
use verdict::{ModelResult, OverallLabel, SignalBreakdown, Verdict, VerdictBasis};

/// Verdict for a lexicon hit. The lexicon is Creole by construction.
pub fn dictionary_verdict(matched_words: Vec<String>) -> Verdict {
    Verdict {
        overall_label: OverallLabel::Unsafe,
        detected_language: CREOLE.to_string(),
        basis: VerdictBasis::Dictionary { matched_words },
    }
}

/// Two-signal arbitration for Creole-routed text.
pub fn arbitrate(classifier: Label, judge: Label) -> OverallLabel {
    match (classifier, judge) {
        (Label::Unsafe, Label::Unsafe) => OverallLabel::Unsafe,
        (Label::Safe, Label::Safe) => OverallLabel::Safe,
        _ => OverallLabel::HumanReview,
    }
}

/// Combine all three signals into the final verdict.
pub fn decide(
    matched_words: Vec<String>,
    classifier: ClassifierSignal,
    judge: JudgeSignal,
) -> Verdict {
    if !matched_words.is_empty() {
        return dictionary_verdict(matched_words);
    }

    let judge_label = judge.label();
    let route = language::route(&judge.detected_language);

    let (overall_label, classifier_label) = if route.skips_classifier() {
        (OverallLabel::from(judge_label), ModelResult::Skipped)
    } else {
        (
            arbitrate(classifier.label, judge_label),
            ModelResult::from(classifier.label),
        )
    };

    debug!(
        overall = %overall_label,
        classifier = classifier_label.as_str(),
        judge = %judge_label,
        language = %judge.detected_language,
        "Fused signals"
    );

    Verdict {
        overall_label,
        detected_language: route.reported_language().to_string(),
        basis: VerdictBasis::Signals(SignalBreakdown {
            classifier_label,
            classifier_confidence: classifier.confidence,
            flagged_terms: classifier.flagged_terms,
            judge_label,
            judge_confidence: judge.confidence,
            explanation: judge.explanation,
            suggested_correction: judge.suggested_correction,
        }),
    }
}
