// ==================== ADMIN NOTIFICATIONS ====================
// Email sent to the administrator when a user is created or deleted

use async_trait::async_trait;
use handlebars::Handlebars;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Created,
    Deleted,
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::Created => write!(f, "created"),
            UserAction::Deleted => write!(f, "deleted"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Failed to register email template: {0}")]
    TemplateRegistration(#[from] handlebars::TemplateError),

    #[error("Failed to render email: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Notification timed out")]
    Timeout,
}

/// Fixed-template message for one user action.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminEmail {
    pub subject: &'static str,
    pub html_body: String,
}

const CREATED_HTML_TEMPLATE: &str = "Hi Admin, <br><br> A new user has been registered with the name {{name}}. <br><br> Thanks, <br> Team";
const DELETED_HTML_TEMPLATE: &str = "Hi Admin, <br><br> A user has been deleted with the name {{name}}. <br><br> Thanks, <br> Team";

#[derive(Serialize)]
struct TemplateData<'a> {
    name: &'a str,
}

/// Handlebars registry holding both admin templates. `{{name}}` is HTML-escaped.
pub struct AdminTemplates {
    handlebars: Handlebars<'static>,
}

impl AdminTemplates {
    pub fn new() -> Result<Self, NotificationError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("user_created", CREATED_HTML_TEMPLATE)?;
        handlebars.register_template_string("user_deleted", DELETED_HTML_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn compose(&self, name: &str, action: UserAction) -> Result<AdminEmail, NotificationError> {
        let (template, subject) = match action {
            UserAction::Created => ("user_created", "New User Registration"),
            UserAction::Deleted => ("user_deleted", "User Deleted"),
        };
        let html_body = self.handlebars.render(template, &TemplateData { name })?;
        Ok(AdminEmail { subject, html_body })
    }
}

#[async_trait]
pub trait AdminNotifier: Send + Sync {
    async fn notify(&self, name: &str, action: UserAction) -> Result<(), NotificationError>;
}

/// Sends over authenticated, TLS-encrypted SMTP submission.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    templates: AdminTemplates,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        // 465 speaks TLS from the first byte, anything else upgrades with STARTTLS
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.username.parse()?,
            to: config.admin_email.parse()?,
            templates: AdminTemplates::new()?,
        })
    }

    fn build_message(&self, email: AdminEmail) -> Result<Message, NotificationError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)?;
        Ok(message)
    }
}

#[async_trait]
impl AdminNotifier for SmtpNotifier {
    async fn notify(&self, name: &str, action: UserAction) -> Result<(), NotificationError> {
        let message = self.build_message(self.templates.compose(name, action)?)?;

        self.transport.send(message).await?;
        log::info!("📧 Admin notified: user {} {}", name, action);

        Ok(())
    }
}

/// Used when no mail account is configured: the message is only logged.
pub struct LogNotifier {
    templates: AdminTemplates,
}

impl LogNotifier {
    pub fn new() -> Result<Self, NotificationError> {
        Ok(Self {
            templates: AdminTemplates::new()?,
        })
    }
}

#[async_trait]
impl AdminNotifier for LogNotifier {
    async fn notify(&self, name: &str, action: UserAction) -> Result<(), NotificationError> {
        let email = self.templates.compose(name, action)?;
        log::info!(
            "📧 [mail disabled] {} - {}",
            email.subject,
            email.html_body
        );
        Ok(())
    }
}
