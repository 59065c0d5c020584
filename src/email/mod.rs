//! Transactional email. Every public submission triggers two messages: an
//! acknowledgment to the submitter and an alert to the association inbox.
//! Delivery is best-effort: failures are logged and never surface in the
//! HTTP response.

pub mod templates;

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{self, SmtpConfig};

pub use templates::EmailTemplate;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid email address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// A fully rendered message ready to hand to a transport
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

/// SMTP delivery over lettre's async transport
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpSender {
    pub fn from_config(cfg: &SmtpConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .map_err(|e| EmailError::Transport(e.to_string()))?
            .port(cfg.port);

        if !cfg.username.is_empty() {
            builder = builder
                .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()));
        }

        Ok(Self { transport: builder.build() })
    }

    fn build_message(email: &OutgoingEmail) -> Result<Message, EmailError> {
        let from: Mailbox =
            email.from.parse().map_err(|_| EmailError::Address(email.from.clone()))?;
        let to: Mailbox = email.to.parse().map_err(|_| EmailError::Address(email.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(email.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl EmailSender for SmtpSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = Self::build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Sender used when SMTP is disabled: logs the message instead of
/// delivering it. Development and CI run with this.
pub struct LogSender;

#[async_trait]
impl EmailSender for LogSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        info!(to = %email.to, subject = %email.subject, "smtp disabled, not sending email");
        Ok(())
    }
}

/// Test sender that records everything handed to it
#[derive(Default)]
pub struct MockSender {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().expect("mock sender poisoned").clone()
    }
}

#[async_trait]
impl EmailSender for MockSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().expect("mock sender poisoned").push(email.clone());
        Ok(())
    }
}

/// Application mail service. Holds the configured sender and the two fixed
/// addresses (from + admin inbox).
pub struct Mailer {
    sender: Arc<dyn EmailSender>,
    from_address: String,
    admin_address: String,
}

impl Mailer {
    pub fn global() -> &'static Mailer {
        static INSTANCE: OnceLock<Mailer> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let smtp = &config::config().smtp;
            let sender: Arc<dyn EmailSender> = if smtp.enabled {
                match SmtpSender::from_config(smtp) {
                    Ok(sender) => Arc::new(sender),
                    Err(e) => {
                        warn!("failed to initialize SMTP transport, falling back to log-only: {}", e);
                        Arc::new(LogSender)
                    }
                }
            } else {
                Arc::new(LogSender)
            };

            Mailer {
                sender,
                from_address: smtp.from_address.clone(),
                admin_address: smtp.admin_address.clone(),
            }
        })
    }

    /// Construct a mailer around an explicit sender (tests)
    pub fn with_sender(
        sender: Arc<dyn EmailSender>,
        from_address: impl Into<String>,
        admin_address: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            from_address: from_address.into(),
            admin_address: admin_address.into(),
        }
    }

    /// Render a template into a message addressed to `to`
    pub fn render(&self, template: &dyn EmailTemplate, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: self.from_address.clone(),
            to: to.to_string(),
            subject: template.subject(),
            html: template.html(),
            text: template.text(),
        }
    }

    /// Render a template addressed to the association's admin inbox
    pub fn render_for_admin(&self, template: &dyn EmailTemplate) -> OutgoingEmail {
        let to = self.admin_address.clone();
        OutgoingEmail {
            from: self.from_address.clone(),
            to,
            subject: template.subject(),
            html: template.html(),
            text: template.text(),
        }
    }

    /// Send a batch of messages, logging and swallowing individual failures
    pub async fn send_all(&self, emails: Vec<OutgoingEmail>) {
        for email in emails {
            if let Err(e) = self.sender.send(&email).await {
                warn!(to = %email.to, subject = %email.subject, "email delivery failed: {}", e);
            }
        }
    }

    /// Fire-and-forget dispatch: the HTTP response never waits on SMTP
    pub fn dispatch(&'static self, emails: Vec<OutgoingEmail>) {
        tokio::spawn(async move {
            self.send_all(emails).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::templates::ContactAdminAlert;

    #[tokio::test]
    async fn mock_sender_records_messages() {
        let sender = Arc::new(MockSender::new());
        let mailer = Mailer::with_sender(sender.clone(), "no-reply@a.org", "admin@a.org");

        let template = ContactAdminAlert {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            subject: "Hello".into(),
            body: "A question".into(),
        };

        let ack = mailer.render(&template, "jane@example.com");
        let alert = mailer.render_for_admin(&template);
        mailer.send_all(vec![ack, alert]).await;

        let sent = sender.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "jane@example.com");
        assert_eq!(sent[1].to, "admin@a.org");
        assert_eq!(sent[0].from, "no-reply@a.org");
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        struct FailingSender;

        #[async_trait]
        impl EmailSender for FailingSender {
            async fn send(&self, _email: &OutgoingEmail) -> Result<(), EmailError> {
                Err(EmailError::Transport("connection refused".into()))
            }
        }

        let mailer = Mailer::with_sender(Arc::new(FailingSender), "no-reply@a.org", "admin@a.org");
        let template = ContactAdminAlert {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            subject: "Hello".into(),
            body: "A question".into(),
        };
        let email = mailer.render(&template, "jane@example.com");

        // Must not panic or propagate the error
        mailer.send_all(vec![email]).await;
    }

    #[test]
    fn smtp_message_builds() {
        let email = OutgoingEmail {
            from: "no-reply@a.org".into(),
            to: "jane@example.com".into(),
            subject: "Subject".into(),
            html: "<p>Hi</p>".into(),
            text: "Hi".into(),
        };
        assert!(SmtpSender::build_message(&email).is_ok());

        let bad = OutgoingEmail { to: "not-an-address".into(), ..email };
        assert!(SmtpSender::build_message(&bad).is_err());
    }
}
