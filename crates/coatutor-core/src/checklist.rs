//! Checklist completeness scoring for free-text practice answers.

use crate::knowledge::KnowledgeBase;
use crate::model::EvaluationResult;
use crate::normalize::{normalize, words};

/// Filler words that say nothing about the concept an item asks for.
const STOPWORDS: &[&str] = &["mention", "include", "define", "role", "phase"];

/// Significant words shorter than this are ignored.
const MIN_WORD_LEN: usize = 4;

/// Words of a checklist item that identify the concept it asks for.
pub fn significant_words(item: &str) -> Vec<String> {
    let lowered = item.to_lowercase();
    words(&lowered)
        .filter(|w| !is_stopword(w))
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .map(str::to_string)
        .collect()
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS
        .iter()
        .any(|s| word == *s || word.strip_suffix('s') == Some(*s))
}

/// Whether a single checklist item is covered by already-normalized text.
pub fn item_satisfied(normalized_text: &str, item: &str) -> bool {
    if normalized_text.is_empty() {
        return false;
    }
    let phrase = normalize(item);
    if !phrase.is_empty() && normalized_text.contains(&phrase) {
        return true;
    }
    significant_words(item)
        .iter()
        .any(|w| normalized_text.contains(w.as_str()))
}

/// Score free text against a checklist.
///
/// An empty checklist scores 100 with nothing missing.
pub fn score_checklist(text: &str, checklist: &[String]) -> EvaluationResult {
    let normalized = normalize(text);

    let missing_items: Vec<String> = checklist
        .iter()
        .filter(|item| !item_satisfied(&normalized, item))
        .cloned()
        .collect();

    let total = checklist.len();
    let matched = total - missing_items.len();
    let score = percent(matched, total);

    EvaluationResult {
        score,
        missing_items,
        sequence_error: false,
        message: tier_message(score).to_string(),
    }
}

/// Score a practice answer against the named topic's checklist.
///
/// Unknown topics are scored against the generic checklist.
pub fn evaluate_practice(text: &str, topic: &str) -> EvaluationResult {
    let profile = KnowledgeBase::shared().get_or_generic(topic);
    score_checklist(text, &profile.practice_checklist)
}

fn percent(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (matched as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Feedback line for a checklist score.
pub fn tier_message(score: u8) -> &'static str {
    match score {
        100 => "Perfect! You covered everything.",
        61..=99 => "Great job! Just a few points left to cover.",
        _ => "Keep trying! Review the missing points below.",
    }
}
