//! Outbound delivery — SMTP email replies and Telegram sales alerts.
//!
//! Both paths are external collaborators: the pipeline treats email as a
//! best-effort boolean and notifications as fire-and-forget.

pub mod email;
pub mod telegram;

pub use email::{EmailConfig, Mailer, SmtpMailer};
pub use telegram::{Notifier, TelegramConfig, TelegramNotifier};
