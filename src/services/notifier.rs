//! Email delivery over SMTP

use crate::config::EmailSettings;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email password not set in environment variable {0}")]
    MissingPassword(String),

    #[error("email settings incomplete: {0} is missing")]
    Incomplete(&'static str),

    #[error("invalid email address {address}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("cannot attach {path}: {reason}")]
    Attachment { path: PathBuf, reason: String },

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A rendered email ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub attachment: Option<PathBuf>,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &EmailContent) -> Result<(), NotifyError>;
}

/// Sends through an authenticated SMTP relay (STARTTLS, or implicit TLS on 465)
pub struct SmtpNotifier {
    settings: EmailSettings,
    password: Option<String>,
}

impl SmtpNotifier {
    /// The password is resolved by the caller from the environment; it is
    /// only checked when a message is sent.
    pub fn new(settings: EmailSettings, password: Option<String>) -> Self {
        Self { settings, password }
    }

    fn mailbox(address: Option<&String>, field: &'static str) -> Result<Mailbox, NotifyError> {
        let address = address.ok_or(NotifyError::Incomplete(field))?;
        address.parse().map_err(|source| NotifyError::Address {
            address: address.clone(),
            source,
        })
    }

    async fn build_message(&self, email: &EmailContent) -> Result<Message, NotifyError> {
        let from = Self::mailbox(self.settings.sender_email.as_ref(), "sender_email")?;
        let to = Self::mailbox(self.settings.recipient_email.as_ref(), "recipient_email")?;

        let html = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone());
        let mut body = MultiPart::mixed().singlepart(html);

        if let Some(path) = &email.attachment {
            let attachment_error = |reason: String| NotifyError::Attachment {
                path: path.clone(),
                reason,
            };
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| attachment_error(e.to_string()))?;
            let content_type = ContentType::parse("image/svg+xml")
                .map_err(|e| attachment_error(e.to_string()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "chart.svg".to_string());
            body = body.singlepart(Attachment::new(file_name).body(bytes, content_type));
        }

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(body)?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &EmailContent) -> Result<(), NotifyError> {
        let password = self
            .password
            .clone()
            .ok_or_else(|| NotifyError::MissingPassword(self.settings.password_env.clone()))?;
        let server = self
            .settings
            .smtp_server
            .as_deref()
            .ok_or(NotifyError::Incomplete("smtp_server"))?;
        let user = self
            .settings
            .sender_email
            .clone()
            .ok_or(NotifyError::Incomplete("sender_email"))?;

        let message = self.build_message(email).await?;

        let builder = if self.settings.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?
        };
        let mailer = builder
            .port(self.settings.smtp_port)
            .credentials(Credentials::new(user, password))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        debug!(server, port = self.settings.smtp_port, "SMTP: connecting");
        mailer.send(message).await?;
        info!(subject = %email.subject, "SMTP: email sent");
        Ok(())
    }
}
