//! Core pipeline types — submissions, intents, classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A lead form submission. Immutable once accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Submission {
    /// Validate field constraints at the boundary.
    ///
    /// Rejected submissions never reach the pipeline or the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("name", &self.name, 2, 100)?;
        check_length("company", &self.company, 2, 100)?;
        check_length("message", &self.message, 10, 1000)?;

        if let Some(ref phone) = self.phone
            && phone.chars().count() > 20
        {
            return Err(ValidationError::PhoneTooLong { max: 20 });
        }

        self.email
            .parse::<lettre::Address>()
            .map_err(|_| ValidationError::InvalidEmail)?;

        Ok(())
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

/// Fixed set of lead intents.
///
/// Variant order is the tie-break order for classification: when two intents
/// score equally, the first-defined one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    DemoRequest,
    PricingInquiry,
    SupportQuestion,
    Partnership,
    GeneralInquiry,
}

impl Intent {
    /// All intents in tie-break order.
    pub const ALL: [Intent; 5] = [
        Intent::DemoRequest,
        Intent::PricingInquiry,
        Intent::SupportQuestion,
        Intent::Partnership,
        Intent::GeneralInquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::DemoRequest => "demo_request",
            Intent::PricingInquiry => "pricing_inquiry",
            Intent::SupportQuestion => "support_question",
            Intent::Partnership => "partnership",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }

    /// Parse a stored intent label. Unknown labels fall back to general_inquiry.
    pub fn from_label(label: &str) -> Intent {
        match label {
            "demo_request" => Intent::DemoRequest,
            "pricing_inquiry" => Intent::PricingInquiry,
            "support_question" => Intent::SupportQuestion,
            "partnership" => Intent::Partnership,
            _ => Intent::GeneralInquiry,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the intent classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    /// First 100 chars of the message, ellipsis-truncated.
    pub summary: String,
}

/// Result returned to the submitter after the pipeline completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadOutcome {
    pub success: bool,
    pub message: String,
    pub lead_id: i64,
    pub response_time_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> Submission {
        Submission {
            name: "Alice Chen".into(),
            email: "alice@example.com".into(),
            company: "Acme Robotics".into(),
            message: "We would like to see a demo of your product.".into(),
            phone: None,
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_submission().validate().is_ok());
    }

    #[test]
    fn short_name_rejected() {
        let mut s = valid_submission();
        s.name = "A".into();
        assert!(matches!(
            s.validate(),
            Err(ValidationError::Length { field: "name", .. })
        ));
    }

    #[test]
    fn short_message_rejected() {
        let mut s = valid_submission();
        s.message = "too short".into();
        assert!(matches!(
            s.validate(),
            Err(ValidationError::Length { field: "message", .. })
        ));
    }

    #[test]
    fn long_message_rejected() {
        let mut s = valid_submission();
        s.message = "x".repeat(1001);
        assert!(s.validate().is_err());
    }

    #[test]
    fn bad_email_rejected() {
        let mut s = valid_submission();
        s.email = "not-an-email".into();
        assert!(matches!(s.validate(), Err(ValidationError::InvalidEmail)));
    }

    #[test]
    fn long_phone_rejected() {
        let mut s = valid_submission();
        s.phone = Some("0".repeat(21));
        assert!(matches!(
            s.validate(),
            Err(ValidationError::PhoneTooLong { .. })
        ));
    }

    #[test]
    fn intent_labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_label(intent.as_str()), intent);
        }
    }

    #[test]
    fn unknown_label_falls_back_to_general() {
        assert_eq!(Intent::from_label("escalation"), Intent::GeneralInquiry);
    }

    #[test]
    fn intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::DemoRequest).unwrap();
        assert_eq!(json, "\"demo_request\"");
    }
}
