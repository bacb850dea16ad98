use contracts::system::contact::{ContactMessage, EmailSendRequest, EmailTemplateParams};
use log::{error, info};
use thiserror::Error;

use super::api::ContactApi;
use crate::shared::api_utils::ApiError;
use crate::shared::config::ContactConfig;

pub const SENT_TEXT: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you soon.";
pub const SEND_FAILED_TEXT: &str =
    "Sorry, there was an error sending your message. Please try again or contact us directly.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in the {0} field.")]
    Missing(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("The contact form is not available right now.")]
    NotConfigured,

    #[error("Sorry, there was an error sending your message. Please try again or contact us directly.")]
    Relay(#[from] ApiError),
}

/// Every field is required; the address needs a local part and a domain.
pub fn validate(form: &ContactMessage) -> Result<(), ContactError> {
    for (label, value) in [
        ("name", &form.name),
        ("email", &form.email),
        ("subject", &form.subject),
        ("message", &form.message),
    ] {
        if value.trim().is_empty() {
            return Err(ContactError::Missing(label));
        }
    }
    match form.email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ContactError::InvalidEmail),
    }
}

pub fn build_request(config: &ContactConfig, form: &ContactMessage) -> EmailSendRequest {
    let email = form.email.trim().to_string();
    EmailSendRequest {
        service_id: config.service_id.clone(),
        template_id: config.template_id.clone(),
        user_id: config.public_key.clone(),
        template_params: EmailTemplateParams {
            from_name: form.name.trim().to_string(),
            from_email: email.clone(),
            subject: form.subject.trim().to_string(),
            message: form.message.clone(),
            to_email: config.to_email.clone(),
            reply_to: email,
        },
    }
}

/// Validate, then hand the message to the relay.
pub async fn submit<A: ContactApi + ?Sized>(
    api: &A,
    config: &ContactConfig,
    form: &ContactMessage,
) -> Result<(), ContactError> {
    validate(form)?;
    if !config.is_configured() {
        return Err(ContactError::NotConfigured);
    }
    match api.send(&build_request(config, form)).await {
        Ok(()) => {
            info!("contact message sent");
            Ok(())
        }
        Err(e) => {
            error!("mail relay rejected contact message: {}", e);
            Err(e.into())
        }
    }
}
