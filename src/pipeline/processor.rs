//! Lead processor — drives the pipeline for one accepted submission.
//!
//! Flow: classify → score → generate reply → email (best effort) →
//! persist exactly once → notify (fire and forget).
//!
//! Classify/score/generate failures are fatal and nothing is persisted.
//! Delivery failures are recovered: email failure is recorded as
//! `email_sent = false`, notification failure is dropped.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::delivery::{Mailer, Notifier};
use crate::error::Error;
use crate::pipeline::classifier::{ClassifierRules, IntentClassifier};
use crate::pipeline::scorer::{QualityScorer, ScoreSignals};
use crate::pipeline::templates::{ResponseGenerator, ResponseTemplates};
use crate::pipeline::types::{LeadOutcome, Submission};
use crate::store::{LeadStore, NewLead};

/// Sequences the pipeline stages and external collaborators.
pub struct LeadProcessor {
    classifier: IntentClassifier,
    scorer: QualityScorer,
    generator: ResponseGenerator,
    store: Arc<LeadStore>,
    mailer: Option<Arc<dyn Mailer>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl LeadProcessor {
    /// Build a processor with the default rule tables and templates.
    pub fn new(
        store: Arc<LeadStore>,
        mailer: Option<Arc<dyn Mailer>>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(ClassifierRules::default()),
            scorer: QualityScorer::new(ScoreSignals::default()),
            generator: ResponseGenerator::new(ResponseTemplates::default()),
            store,
            mailer,
            notifier,
        }
    }

    /// Process one validated submission through the full pipeline.
    pub async fn process(&self, submission: Submission) -> Result<LeadOutcome, Error> {
        let started = Instant::now();

        let classification = self.classifier.classify(&submission.message);
        let score = self.scorer.score(&submission);
        let response = self.generator.generate(
            classification.intent,
            &classification.summary,
            &submission.name,
            &submission.company,
            score,
        )?;

        let email_sent = match &self.mailer {
            Some(mailer) => {
                match mailer
                    .send(&submission.email, &submission.company, &response)
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "Email send failed");
                        false
                    }
                }
            }
            None => {
                debug!("SMTP not configured, skipping email send");
                false
            }
        };

        // Elapsed time covers pipeline start to just before persist;
        // notification latency is deliberately excluded.
        let response_time_ms = started.elapsed().as_millis() as i64;

        let record = NewLead {
            timestamp: Utc::now(),
            name: submission.name,
            email: submission.email,
            company: submission.company,
            message: submission.message,
            phone: submission.phone,
            lead_score: score,
            intent: classification.intent,
            response_time_ms,
            email_sent,
            response_text: response,
        };

        let lead_id = self.store.save(&record).await?;

        info!(
            lead_id,
            intent = %record.intent,
            score = record.lead_score,
            email_sent,
            response_time_ms,
            "Lead processed"
        );

        if let Some(notifier) = &self.notifier {
            let notifier = Arc::clone(notifier);
            let alert = format_alert(&record);
            tokio::spawn(async move {
                notifier.notify(&alert).await;
            });
        }

        Ok(LeadOutcome {
            success: true,
            message: format!(
                "Thank you! We've responded to {} in {}ms",
                record.email, response_time_ms
            ),
            lead_id,
            response_time_ms,
        })
    }
}

/// Format the sales-team alert for a freshly persisted lead.
fn format_alert(lead: &NewLead) -> String {
    let preview: String = lead.message.chars().take(100).collect();
    format!(
        "🔔 New Lead Alert\n\n\
         👤 {} from {}\n\
         📧 {}\n\
         🎯 Intent: {}\n\
         ⭐ Score: {}/10\n\
         ⚡ Response: {}ms\n\n\
         Message: {}...",
        lead.name,
        lead.company,
        lead.email,
        lead.intent,
        lead.lead_score,
        lead.response_time_ms,
        preview,
    )
}
