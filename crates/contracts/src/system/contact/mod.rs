use serde::{Deserialize, Serialize};

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Variables substituted into the mail template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
    pub reply_to: String,
}

/// `POST /api/v1.0/email/send` of the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub service_id: String,
    pub template_id: String,
    /// The relay's public key.
    pub user_id: String,
    pub template_params: EmailTemplateParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_wire_names() {
        let request = EmailSendRequest {
            service_id: "svc".into(),
            template_id: "tpl".into(),
            user_id: "pk".into(),
            template_params: EmailTemplateParams {
                from_name: "Ada".into(),
                from_email: "ada@example.com".into(),
                subject: "Hi".into(),
                message: "Hello".into(),
                to_email: "team@example.com".into(),
                reply_to: "ada@example.com".into(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_id"], "pk");
        assert_eq!(json["template_params"]["from_email"], "ada@example.com");
        assert_eq!(json["template_params"]["reply_to"], "ada@example.com");
    }
}
