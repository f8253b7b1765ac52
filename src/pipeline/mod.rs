//! Rule-based lead processing pipeline: classify → score → template-fill.

pub mod classifier;
pub mod processor;
pub mod scorer;
pub mod templates;
pub mod types;

pub use classifier::{ClassifierRules, IntentClassifier};
pub use processor::LeadProcessor;
pub use scorer::{QualityScorer, ScoreSignals};
pub use templates::{ResponseGenerator, ResponseTemplates};
pub use types::{Classification, Intent, LeadOutcome, Submission};
