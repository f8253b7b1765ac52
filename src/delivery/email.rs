//! SMTP reply sender via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::DeliveryError;

/// SMTP configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl EmailConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_USER` or `SMTP_PASSWORD` is not set (email disabled).
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("SMTP_USER").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;

        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());

        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let from_address = std::env::var("FROM_EMAIL").unwrap_or_else(|_| username.clone());

        Some(Self {
            smtp_host,
            smtp_port,
            username,
            password,
            from_address,
        })
    }
}

/// Outbound email contract. The pipeline only observes success/failure.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the generated reply to a lead. `company` is used for the subject.
    async fn send(&self, to: &str, company: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Mailer backed by lettre's blocking SMTP transport (STARTTLS).
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, company: &str, body: &str) -> Result<(), DeliveryError> {
        let config = self.config.clone();
        let recipient = to.to_string();
        let subject = format!("Re: Your inquiry from {company}");
        let body = body.to_string();

        // lettre's SmtpTransport is blocking; keep it off the async runtime.
        tokio::task::spawn_blocking(move || send_blocking(&config, &recipient, &subject, &body))
            .await
            .map_err(|e| DeliveryError::Smtp(format!("send task panicked: {e}")))??;

        tracing::info!(to = %to_redacted(to), "Reply email sent");
        Ok(())
    }
}

fn send_blocking(
    config: &EmailConfig,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<(), DeliveryError> {
    let from: Mailbox = format!("Aurora Lead Response <{}>", config.from_address)
        .parse()
        .map_err(|e| DeliveryError::Address {
            address: config.from_address.clone(),
            reason: format!("{e}"),
        })?;

    let to_mailbox: Mailbox = to.parse().map_err(|e| DeliveryError::Address {
        address: to.to_string(),
        reason: format!("{e}"),
    })?;

    let email = Message::builder()
        .from(from)
        .to(to_mailbox)
        .subject(subject)
        .body(body.to_string())
        .map_err(|e| DeliveryError::Build(format!("{e}")))?;

    let creds = Credentials::new(config.username.clone(), config.password.clone());
    let transport = SmtpTransport::starttls_relay(&config.smtp_host)
        .map_err(|e| DeliveryError::Smtp(format!("STARTTLS relay error: {e}")))?
        .port(config.smtp_port)
        .credentials(creds)
        .build();

    transport
        .send(&email)
        .map_err(|e| DeliveryError::Smtp(format!("{e}")))?;

    Ok(())
}

/// Keep full recipient addresses out of the logs.
fn to_redacted(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let head: String = local.chars().take(2).collect();
            format!("{head}***@{domain}")
        }
        None => "***".to_string(),
    }
}
