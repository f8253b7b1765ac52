//! Per-intent reply templates and placeholder substitution.

use std::collections::HashMap;

use crate::error::PipelineError;
use crate::pipeline::types::Intent;

const DEMO_REQUEST: &str = "\
Hi {name},

Thank you for your interest in a demo! I'd be delighted to show you what we can do for {company}.

Based on your message, it sounds like you're looking to {intent_summary}. I've reserved a few time slots for this week. You can pick whichever works best for your schedule:

📅 Book a demo: [calendar-link-here]

In the meantime, here's a quick 2-minute overview video that covers the basics: [video-link]

Looking forward to connecting!

Best regards,
Aurora - Lead Response AI
";

const PRICING_INQUIRY: &str = "\
Hi {name},

Thanks for reaching out about pricing for {company}!

Our pricing is designed to scale with your needs. Here's a quick overview:

• Starter: $99/month (up to 500 leads/month)
• Growth: $299/month (up to 2,000 leads/month)
• Enterprise: Custom pricing (unlimited + dedicated support)

All plans include:
✓ <60 second response times
✓ Email + Telegram notifications
✓ Full analytics dashboard
✓ 14-day free trial (no credit card required)

Based on what you shared about {company}, the {recommended_plan} plan would likely be the best fit. Happy to jump on a quick call to discuss your specific needs.

📅 Schedule a call: [calendar-link-here]
💰 Start free trial: [trial-link-here]

Best regards,
Aurora - Lead Response AI
";

const SUPPORT_QUESTION: &str = "\
Hi {name},

Thanks for reaching out! I'm here to help resolve any issues you're experiencing.

Based on your message, it sounds like you're dealing with: {intent_summary}

Here are a few quick troubleshooting steps:

1. [Common fix #1]
2. [Common fix #2]
3. [Link to detailed docs]

If those don't resolve it, our support team is standing by:
📧 Email: support@example.com
💬 Live chat: [chat-link]
📞 Phone: [phone-number] (Mon-Fri 9am-6pm EST)

We'll get you sorted out right away!

Best regards,
Aurora - Lead Response AI
";

const PARTNERSHIP: &str = "\
Hi {name},

Thank you for reaching out about a potential partnership with {company}!

We're always interested in exploring collaborations that create mutual value. Based on your message, it sounds like you're thinking about {intent_summary}.

I'd love to learn more about what you have in mind. Here's the best way forward:

1. Share more details: What type of partnership are you envisioning? (Integration, referral, co-marketing, etc.)
2. Let's schedule a call: [calendar-link-here]
3. In the meantime, here's our partnership overview: [partnership-deck-link]

Our partnerships team typically responds within 24 hours, but I wanted to get the conversation started right away.

Looking forward to exploring this together!

Best regards,
Aurora - Lead Response AI
";

const GENERAL_INQUIRY: &str = "\
Hi {name},

Thanks for reaching out! Happy to help answer your questions about what we do.

Based on your message, it sounds like you're curious about {intent_summary}.

Here's a quick overview:

We help B2B companies respond to leads in under 60 seconds (vs the industry average of 42 hours). Our system:
• Automatically classifies lead intent
• Sends personalized responses instantly
• Notifies your sales team via Telegram
• Tracks all interactions in a dashboard

Want to see it in action?
📅 Book a 10-minute demo: [calendar-link-here]
📄 Read case studies: [case-studies-link]
🎬 Watch 2-min overview: [video-link]

Let me know if you have any other questions!

Best regards,
Aurora - Lead Response AI
";

/// Lead score at or above which the Growth plan is recommended.
const GROWTH_PLAN_THRESHOLD: u8 = 8;

/// Fixed reply template per intent.
#[derive(Debug, Clone)]
pub struct ResponseTemplates {
    templates: HashMap<Intent, String>,
}

impl ResponseTemplates {
    pub fn new(templates: HashMap<Intent, String>) -> Self {
        Self { templates }
    }

    /// Template for an intent, falling back to the general_inquiry text.
    fn get(&self, intent: Intent) -> &str {
        self.templates
            .get(&intent)
            .or_else(|| self.templates.get(&Intent::GeneralInquiry))
            .map(String::as_str)
            .unwrap_or(GENERAL_INQUIRY)
    }
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(Intent::DemoRequest, DEMO_REQUEST.to_string());
        templates.insert(Intent::PricingInquiry, PRICING_INQUIRY.to_string());
        templates.insert(Intent::SupportQuestion, SUPPORT_QUESTION.to_string());
        templates.insert(Intent::Partnership, PARTNERSHIP.to_string());
        templates.insert(Intent::GeneralInquiry, GENERAL_INQUIRY.to_string());
        Self::new(templates)
    }
}

/// Fills reply templates from submission fields and derived values.
pub struct ResponseGenerator {
    templates: ResponseTemplates,
}

impl ResponseGenerator {
    pub fn new(templates: ResponseTemplates) -> Self {
        Self { templates }
    }

    /// Generate the reply text. Pure function of its inputs.
    pub fn generate(
        &self,
        intent: Intent,
        intent_summary: &str,
        name: &str,
        company: &str,
        score: u8,
    ) -> Result<String, PipelineError> {
        let plan = recommended_plan(score);
        let vars = [
            ("name", name),
            ("company", company),
            ("intent_summary", intent_summary),
            ("recommended_plan", plan),
        ];
        let filled = render(self.templates.get(intent), &vars)?;
        Ok(filled.trim().to_string())
    }
}

/// Plan recommendation from the lead score.
pub fn recommended_plan(score: u8) -> &'static str {
    if score >= GROWTH_PLAN_THRESHOLD {
        "Growth"
    } else {
        "Starter"
    }
}

/// Literal `{placeholder}` substitution.
///
/// Errors if the template references a placeholder that is not in `vars`.
/// Unused vars are fine.
fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, PipelineError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or(PipelineError::UnterminatedPlaceholder)?;
        let key = &after[..close];
        let value = vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| PipelineError::MissingPlaceholder(key.to_string()))?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> ResponseGenerator {
        ResponseGenerator::new(ResponseTemplates::default())
    }

    #[test]
    fn demo_reply_includes_name_and_company() {
        let reply = generator()
            .generate(Intent::DemoRequest, "see a demo", "Alice", "Acme Robotics", 7)
            .unwrap();
        assert!(reply.starts_with("Hi Alice,"));
        assert!(reply.contains("Acme Robotics"));
        assert!(reply.contains("see a demo"));
    }

    #[test]
    fn high_score_recommends_growth_plan() {
        let reply = generator()
            .generate(Intent::PricingInquiry, "pricing", "Bob", "Northwind", 8)
            .unwrap();
        assert!(reply.contains("the Growth plan"));
    }

    #[test]
    fn low_score_recommends_starter_plan() {
        let reply = generator()
            .generate(Intent::PricingInquiry, "pricing", "Bob", "Northwind", 7)
            .unwrap();
        assert!(reply.contains("the Starter plan"));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generator()
            .generate(Intent::Partnership, "an integration", "Eve", "Initech", 6)
            .unwrap();
        let b = generator()
            .generate(Intent::Partnership, "an integration", "Eve", "Initech", 6)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reply_is_trimmed() {
        let reply = generator()
            .generate(Intent::GeneralInquiry, "your product", "Dan", "Globex", 5)
            .unwrap();
        assert_eq!(reply, reply.trim());
    }

    #[test]
    fn missing_template_falls_back_to_general() {
        let mut templates = HashMap::new();
        templates.insert(Intent::GeneralInquiry, "Hi {name}, general reply.".to_string());
        let generator = ResponseGenerator::new(ResponseTemplates::new(templates));
        let reply = generator
            .generate(Intent::DemoRequest, "a demo", "Alice", "Acme", 5)
            .unwrap();
        assert_eq!(reply, "Hi Alice, general reply.");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let mut templates = HashMap::new();
        templates.insert(Intent::GeneralInquiry, "Hi {surname}".to_string());
        let generator = ResponseGenerator::new(ResponseTemplates::new(templates));
        let err = generator
            .generate(Intent::GeneralInquiry, "x", "Alice", "Acme", 5)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingPlaceholder(ref p) if p == "surname"));
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let mut templates = HashMap::new();
        templates.insert(Intent::GeneralInquiry, "Hi {name".to_string());
        let generator = ResponseGenerator::new(ResponseTemplates::new(templates));
        let err = generator
            .generate(Intent::GeneralInquiry, "x", "Alice", "Acme", 5)
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnterminatedPlaceholder));
    }

    #[test]
    fn plan_threshold_boundaries() {
        assert_eq!(recommended_plan(10), "Growth");
        assert_eq!(recommended_plan(8), "Growth");
        assert_eq!(recommended_plan(7), "Starter");
        assert_eq!(recommended_plan(1), "Starter");
    }

    #[test]
    fn all_default_templates_render() {
        for intent in Intent::ALL {
            let reply = generator()
                .generate(intent, "summary text", "Alice", "Acme Robotics", 9)
                .unwrap();
            assert!(reply.contains("Alice"), "{intent} template missing name");
        }
    }
}
