// Remote signals: the statistical classifier and the LLM judge.
//
// Both are advisory: a transport failure or a malformed answer is logged and
// replaced by the type's `unavailable()` default, never surfaced as a request
// failure. Retries, if ever wanted, belong in the adapters.

pub mod classifier;
pub mod gemini;
pub mod traits;

use tracing::warn;

use traits::{ClassifierSignal, JudgeSignal, LanguageJudge, ToxicityClassifier};

/// Run the classifier, falling back to the safe zero-confidence default.
pub async fn classify_or_default(classifier: &dyn ToxicityClassifier, text: &str) -> ClassifierSignal {
    match classifier.classify(text).await {
        Ok(signal) => signal,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Classifier unavailable, using default");
            ClassifierSignal::unavailable()
        }
    }
}

/// Run the judge, falling back to "unknown language, not toxic".
pub async fn judge_or_default(judge: &dyn LanguageJudge, text: &str) -> JudgeSignal {
    match judge.judge(text).await {
        Ok(signal) => signal,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Judge unavailable, using default");
            JudgeSignal::unavailable()
        }
    }
}
