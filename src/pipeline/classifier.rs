//! Keyword-based intent classifier.
//!
//! Each intent has a keyword list (1 point per hit) and a phrase list
//! (3 points per hit — a stronger signal). The highest-scoring intent wins;
//! ties break toward the first-defined intent because selection is a stable
//! max over the ordered rule table. An all-zero score means no recognizable
//! signal and defaults to general_inquiry.

use crate::pipeline::types::{Classification, Intent};

/// Match rules for a single intent.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<&'static str>,
    pub phrases: Vec<&'static str>,
}

/// Ordered intent rule table. Order is the tie-break order.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    rules: Vec<IntentRule>,
}

impl ClassifierRules {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::new(vec![
            IntentRule {
                intent: Intent::DemoRequest,
                keywords: vec!["demo", "trial", "test", "try", "see how", "show me", "walkthrough"],
                phrases: vec![
                    "book a demo",
                    "schedule demo",
                    "request demo",
                    "free trial",
                    "want to try",
                ],
            },
            IntentRule {
                intent: Intent::PricingInquiry,
                keywords: vec!["price", "pricing", "cost", "how much", "budget", "quote", "proposal"],
                phrases: vec![
                    "what does it cost",
                    "pricing information",
                    "pricing plan",
                    "how much does",
                ],
            },
            IntentRule {
                intent: Intent::SupportQuestion,
                keywords: vec!["help", "issue", "problem", "error", "bug", "not working", "support"],
                phrases: vec!["need help", "having trouble", "doesn't work", "getting an error"],
            },
            IntentRule {
                intent: Intent::Partnership,
                keywords: vec![
                    "partner",
                    "partnership",
                    "collaborate",
                    "integration",
                    "affiliate",
                    "reseller",
                ],
                phrases: vec!["work together", "explore partnership", "partnership opportunity"],
            },
            IntentRule {
                intent: Intent::GeneralInquiry,
                keywords: vec![
                    "information",
                    "learn more",
                    "tell me",
                    "curious",
                    "question",
                    "wondering",
                ],
                phrases: vec!["learn more about", "more information", "can you tell me"],
            },
        ])
    }
}

/// Weight of a phrase hit relative to a keyword hit.
const PHRASE_WEIGHT: usize = 3;

/// Maximum summary length in characters before truncation.
const SUMMARY_MAX_CHARS: usize = 100;

/// Classifies a message into one of the fixed intents.
pub struct IntentClassifier {
    rules: ClassifierRules,
}

impl IntentClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// Classify a message. Always returns a value; no keyword/phrase match
    /// defaults to general_inquiry.
    pub fn classify(&self, message: &str) -> Classification {
        let lower = message.to_lowercase();

        let mut best_intent = Intent::GeneralInquiry;
        let mut best_score = 0usize;

        for rule in &self.rules.rules {
            let keyword_hits = rule.keywords.iter().filter(|k| lower.contains(*k)).count();
            let phrase_hits = rule.phrases.iter().filter(|p| lower.contains(*p)).count();
            let score = keyword_hits + phrase_hits * PHRASE_WEIGHT;

            // Strictly-greater comparison keeps the first-defined intent on ties.
            if score > best_score {
                best_score = score;
                best_intent = rule.intent;
            }
        }

        if best_score == 0 {
            best_intent = Intent::GeneralInquiry;
        }

        Classification {
            intent: best_intent,
            summary: summarize(message),
        }
    }
}

/// Build the intent summary: first 100 chars, trimmed, with "..." when truncated.
fn summarize(message: &str) -> String {
    let mut summary: String = message.chars().take(SUMMARY_MAX_CHARS).collect();
    summary = summary.trim().to_string();
    if message.chars().count() > SUMMARY_MAX_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(ClassifierRules::default())
    }

    #[test]
    fn demo_keywords_classify_as_demo_request() {
        let result = classifier().classify("We need a demo ASAP, I'm the CEO");
        assert_eq!(result.intent, Intent::DemoRequest);
    }

    #[test]
    fn pricing_phrase_outweighs_keyword() {
        // "what does it cost" is a phrase (+3) plus the "cost" keyword (+1)
        let result = classifier().classify("What does it cost for 50 users?");
        assert_eq!(result.intent, Intent::PricingInquiry);
    }

    #[test]
    fn support_keywords_classify_as_support() {
        let result = classifier().classify("I'm getting an error and need help with a bug");
        assert_eq!(result.intent, Intent::SupportQuestion);
    }

    #[test]
    fn partnership_keywords_classify_as_partnership() {
        let result = classifier().classify("Interested in a reseller partnership, can we collaborate?");
        assert_eq!(result.intent, Intent::Partnership);
    }

    #[test]
    fn no_match_defaults_to_general_inquiry() {
        let result = classifier().classify("zzz qqq xxx nothing recognizable here");
        assert_eq!(result.intent, Intent::GeneralInquiry);
    }

    #[test]
    fn empty_message_defaults_to_general_inquiry() {
        // Unreachable via HTTP (boundary rejects < 10 chars) but the
        // classifier itself must still return a value.
        let result = classifier().classify("");
        assert_eq!(result.intent, Intent::GeneralInquiry);
        assert_eq!(result.summary, "");
    }

    #[test]
    fn tie_breaks_toward_first_defined_intent() {
        // "trial" (demo keyword) and "price" (pricing keyword) score 1 each;
        // demo_request is defined first and wins.
        let result = classifier().classify("trial price");
        assert_eq!(result.intent, Intent::DemoRequest);
    }

    #[test]
    fn classification_is_case_insensitive() {
        let result = classifier().classify("BOOK A DEMO for our team please!");
        assert_eq!(result.intent, Intent::DemoRequest);
    }

    #[test]
    fn short_message_summary_untruncated() {
        let result = classifier().classify("Short message here");
        assert_eq!(result.summary, "Short message here");
    }

    #[test]
    fn long_message_summary_truncated_with_ellipsis() {
        let message = "a".repeat(150);
        let result = classifier().classify(&message);
        assert_eq!(result.summary.chars().count(), 103);
        assert!(result.summary.ends_with("..."));
    }

    #[test]
    fn summary_is_exactly_100_chars_without_ellipsis_at_boundary() {
        let message = "b".repeat(100);
        let result = classifier().classify(&message);
        assert_eq!(result.summary, message);
    }

    #[test]
    fn summary_trims_whitespace_at_cut() {
        let message = format!("{} {}", "c".repeat(99), "d".repeat(50));
        let result = classifier().classify(&message);
        assert_eq!(result.summary, format!("{}...", "c".repeat(99)));
    }
}
