use std::sync::Arc;

use lead_respond::config::AppConfig;
use lead_respond::delivery::{
    EmailConfig, Mailer, Notifier, SmtpMailer, TelegramConfig, TelegramNotifier,
};
use lead_respond::pipeline::LeadProcessor;
use lead_respond::store::LeadStore;
use lead_respond::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("⚡ Lead Respond v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listening: http://{}", config.bind_addr);
    eprintln!("   Database: {}", config.db_path.display());

    let store = Arc::new(LeadStore::new_local(&config.db_path).await?);

    let mailer: Option<Arc<dyn Mailer>> = match EmailConfig::from_env() {
        Some(email_config) => {
            eprintln!(
                "   Email: enabled (SMTP: {}:{})",
                email_config.smtp_host, email_config.smtp_port
            );
            Some(Arc::new(SmtpMailer::new(email_config)))
        }
        None => {
            eprintln!("   Email: disabled (SMTP_USER/SMTP_PASSWORD not set)");
            None
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = match TelegramConfig::from_env() {
        Some(telegram_config) => {
            eprintln!("   Telegram: enabled (chat {})", telegram_config.chat_id);
            Some(Arc::new(TelegramNotifier::new(telegram_config)))
        }
        None => {
            eprintln!("   Telegram: disabled (TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set)");
            None
        }
    };

    let processor = Arc::new(LeadProcessor::new(Arc::clone(&store), mailer, notifier));

    let app = web::routes(AppState {
        processor,
        store,
        landing_page: config.landing_page,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Lead response server started");
    axum::serve(listener, app).await?;

    Ok(())
}
