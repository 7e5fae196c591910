// Colored terminal output for verdicts and audit status.
//
// main.rs delegates all human-readable formatting here; `--json` output
// bypasses this module entirely.

use colored::{ColoredString, Colorize};

use crate::db::models::{AuditStats, LoggedRequest};
use crate::fusion::verdict::{ModelResult, OverallLabel, Verdict};
use crate::signals::traits::Label;

use super::truncate_chars;

fn colorize_overall(label: OverallLabel) -> ColoredString {
    match label {
        OverallLabel::Unsafe => label.as_str().red().bold(),
        OverallLabel::HumanReview => label.as_str().yellow().bold(),
        OverallLabel::Safe => label.as_str().green().bold(),
    }
}

fn colorize_signal(label: &str) -> ColoredString {
    match label {
        "unsafe" => label.red(),
        "skipped" => label.dimmed(),
        _ => label.green(),
    }
}

/// Display one verdict.
pub fn display_verdict(verdict: &Verdict) {
    println!(
        "\n{} {}",
        "Verdict:".bold(),
        colorize_overall(verdict.overall_label)
    );
    println!("  Language: {}", verdict.detected_language);

    if verdict.dictionary_match() {
        println!(
            "  {} {}",
            "Dictionary match:".red(),
            verdict.matched_words().join(", ")
        );
        return;
    }

    let Some(signals) = verdict.signals() else {
        return;
    };

    let classifier = match signals.classifier_label {
        ModelResult::Skipped => colorize_signal("skipped").to_string(),
        other => format!(
            "{} ({})",
            colorize_signal(other.as_str()),
            signals.classifier_confidence
        ),
    };
    println!("  Classifier: {classifier}");
    if signals.classifier_label != ModelResult::Skipped && !signals.flagged_terms.is_empty() {
        println!(
            "    {} {}",
            "flagged:".dimmed(),
            signals.flagged_terms.join(", ").dimmed()
        );
    }

    let judge = match signals.judge_label {
        Label::Unsafe => colorize_signal("unsafe"),
        Label::Safe => colorize_signal("safe"),
    };
    println!("  Judge:      {} ({})", judge, signals.judge_confidence);

    if !signals.explanation.is_empty() {
        println!("    {}", signals.explanation.dimmed());
    }
    if !signals.suggested_correction.is_empty() {
        println!(
            "  {} {}",
            "Suggested correction:".bold(),
            signals.suggested_correction
        );
    }
}

/// Display the offline lexicon check.
pub fn display_lexicon_check(normalized: &str, matched_words: &[String]) {
    println!("  Normalized: {}", normalized.dimmed());
    if matched_words.is_empty() {
        println!("  {}", "No lexicon match".green());
    } else {
        println!(
            "  {} {}",
            "Lexicon match:".red().bold(),
            matched_words.join(", ")
        );
    }
}

/// Display audit log counts and the latest requests.
pub fn display_stats(stats: &AuditStats, recent: &[LoggedRequest]) {
    println!("\n{}", "=== Audit Log ===".bold());
    println!("  Requests:           {}", stats.total_requests);
    println!("  Dictionary matches: {}", stats.dictionary_matches);
    println!("  Feedback reports:   {}", stats.feedback_reports);

    if !stats.by_label.is_empty() {
        println!("\n  {}", "By verdict".dimmed());
        for (label, count) in &stats.by_label {
            println!("    {:<14} {:>6}", colorize_signal(label), count);
        }
    }

    if !stats.by_language.is_empty() {
        println!("\n  {}", "By language".dimmed());
        for (language, count) in &stats.by_language {
            println!("    {:<14} {:>6}", language, count);
        }
    }

    if !recent.is_empty() {
        println!("\n  {}", "Latest requests".dimmed());
        for req in recent {
            println!(
                "    {} {:<12} {:<8} \"{}\"",
                req.created_at.get(..19).unwrap_or(req.created_at.as_str()).dimmed(),
                colorize_signal(&req.overall_label),
                req.detected_language,
                truncate_chars(&req.display_text, 60),
            );
        }
    }
}
