//! Lead quality scorer — additive signal counting, clamped to 1–10.

use crate::pipeline::types::Submission;

/// Signal word lists used by the scorer.
#[derive(Debug, Clone)]
pub struct ScoreSignals {
    /// Buying-urgency phrases, each worth +1 (capped at +2 total).
    pub high_intent: Vec<&'static str>,
    /// Quality markers worth +1 each.
    pub positive: Vec<&'static str>,
    /// Quality markers worth -1 each.
    pub negative: Vec<&'static str>,
    /// Company-name tokens that suggest a throwaway/generic entry.
    pub generic_company_tokens: Vec<&'static str>,
}

impl Default for ScoreSignals {
    fn default() -> Self {
        Self {
            high_intent: vec![
                "urgent",
                "asap",
                "immediately",
                "soon",
                "this week",
                "ready to",
                "looking to buy",
                "need this",
                "budget approved",
                "decision maker",
                "ceo",
                "founder",
                "director",
            ],
            positive: vec![
                "specific", "detailed", "clear", "team", "company", "enterprise", "growing",
            ],
            negative: vec!["maybe", "just browsing", "student", "personal project", "school"],
            generic_company_tokens: vec!["test", "company", "inc", "llc", "corp"],
        }
    }
}

/// Baseline every lead starts from.
const BASELINE: i64 = 5;

/// Maximum bonus from high-intent signals.
const HIGH_INTENT_CAP: i64 = 2;

/// Scores lead quality 1–10 from submission fields. Pure and deterministic.
pub struct QualityScorer {
    signals: ScoreSignals,
}

impl QualityScorer {
    pub fn new(signals: ScoreSignals) -> Self {
        Self { signals }
    }

    pub fn score(&self, submission: &Submission) -> u8 {
        let mut score = BASELINE;
        let message_lower = submission.message.to_lowercase();

        // Length and detail (+0 to +2)
        let message_chars = submission.message.chars().count();
        if message_chars > 200 {
            score += 2;
        } else if message_chars > 100 {
            score += 1;
        }

        // High-intent signals (+1 each, capped)
        let high_intent_hits = self
            .signals
            .high_intent
            .iter()
            .filter(|s| message_lower.contains(*s))
            .count() as i64;
        score += high_intent_hits.min(HIGH_INTENT_CAP);

        // Quality signal delta, unbounded before the final clamp
        let positive_hits = self
            .signals
            .positive
            .iter()
            .filter(|s| message_lower.contains(*s))
            .count() as i64;
        let negative_hits = self
            .signals
            .negative
            .iter()
            .filter(|s| message_lower.contains(*s))
            .count() as i64;
        score += positive_hits - negative_hits;

        // Phone number provided (+1)
        if submission.phone.is_some() {
            score += 1;
        }

        // Company name looks real (+1 if not generic)
        let company_lower = submission.company.to_lowercase();
        let generic = self
            .signals
            .generic_company_tokens
            .iter()
            .any(|t| company_lower.contains(*t));
        if !generic {
            score += 1;
        }

        score.clamp(1, 10) as u8
    }
}
