use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::settings::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),

    #[error("SMTP is not configured")]
    NotConfigured,
}

/// Outbound plain-text mail. The trait exists so use cases can be tested
/// without a live SMTP server.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), EmailError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Builds the mailer from settings. Returns `None` when no SMTP host is
    /// configured, in which case mail-sending endpoints fail gracefully.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, EmailError> {
        let Some(host) = config.smtp_host.as_deref() else {
            return Ok(None);
        };

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(config.smtp_port);

        if let (Some(user), Some(password)) =
            (config.smtp_user.clone(), config.smtp_password.clone())
        {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Some(SmtpMailer {
            transport: builder.build(),
            from: config.mail_from.clone(),
        }))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        tracing::info!(recipient = %to, "email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for std::sync::Arc<dyn Mailer> {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), EmailError> {
        self.as_ref().send(to, subject, body).await
    }
}

/// Used when SMTP is not configured: every send fails with `NotConfigured`
/// and the caller decides how to surface it.
#[derive(Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, _subject: &str, _body: String) -> Result<(), EmailError> {
        tracing::warn!(recipient = %to, "SMTP not configured, dropping email");
        Err(EmailError::NotConfigured)
    }
}
