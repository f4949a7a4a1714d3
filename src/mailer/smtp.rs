//! SMTP transport (lettre, STARTTLS relay)

use super::{Mailer, OutgoingMail};
use crate::config::SmtpConfig;
use crate::error::{Result, SplitError};
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, sender: &str) -> Result<Self> {
        let from = mailbox(&config.from_name, sender)?;

        let creds = Credentials::new(
            config.username.clone(),
            config.password.clone().unwrap_or_default(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| SplitError::Mail(format!("SMTP transport: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let data = tokio::fs::read(&mail.attachment).await?;
        let pdf = ContentType::parse("application/pdf")
            .map_err(|e| SplitError::Mail(format!("content type: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(mailbox(&mail.to_name, &mail.to_email)?)
            .subject(mail.subject.as_str())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(Attachment::new(mail.attachment_name()).body(data, pdf)),
            )
            .map_err(|e| SplitError::Mail(format!("message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| SplitError::Mail(e.to_string()))?;
        Ok(())
    }
}

/// Mailbox with a display name, or the bare address when the name is empty
fn mailbox(name: &str, email: &str) -> Result<Mailbox> {
    let address = email
        .trim()
        .parse::<Address>()
        .map_err(|e| SplitError::Mail(format!("invalid address {}: {}", email, e)))?;
    let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
    Ok(Mailbox::new(name, address))
}
