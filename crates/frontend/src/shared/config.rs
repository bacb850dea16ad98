//! Client configuration.
//!
//! The defaults are embedded as TOML; the backend URL and the mail relay
//! credentials can be pinned at build time with `NEURACHAT_*` environment
//! variables.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub upload: UploadConfig,
    pub auth: AuthConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    /// Empty means "same host as the page, port 8000".
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChatConfig {
    pub reveal_interval_ms: u32,
    pub response_delay_ms: u32,
    pub scroll_debounce_ms: u32,
    pub scroll_bottom_threshold_px: i32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    pub success_banner_ms: u32,
    pub fail_banner_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    pub redirect_settle_ms: u32,
}

/// Mail relay used by the contact form.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ContactConfig {
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub to_email: String,
    pub status_clear_ms: u32,
}

impl ContactConfig {
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[backend]
url = ""

[chat]
reveal_interval_ms = 50
response_delay_ms = 1000
scroll_debounce_ms = 100
scroll_bottom_threshold_px = 10

[upload]
success_banner_ms = 5000
fail_banner_ms = 500

[auth]
redirect_settle_ms = 300

[contact]
endpoint = "https://api.emailjs.com/api/v1.0/email/send"
service_id = ""
template_id = ""
public_key = ""
to_email = ""
status_clear_ms = 5000
"#;

const BACKEND_PORT: u16 = 8000;

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Embedded defaults plus the build-time backend override.
    pub fn load() -> Self {
        let mut config = match Self::from_toml(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("embedded config is invalid: {}", e);
                Self::fallback()
            }
        };
        if let Some(url) = option_env!("NEURACHAT_BACKEND_URL") {
            log::info!("backend URL pinned at build time: {}", url);
            config.backend.url = url.to_string();
        }
        let contact = &mut config.contact;
        for (value, pinned) in [
            (&mut contact.service_id, option_env!("NEURACHAT_EMAILJS_SERVICE_ID")),
            (&mut contact.template_id, option_env!("NEURACHAT_EMAILJS_TEMPLATE_ID")),
            (&mut contact.public_key, option_env!("NEURACHAT_EMAILJS_PUBLIC_KEY")),
            (&mut contact.to_email, option_env!("NEURACHAT_CONTACT_TO")),
        ] {
            if let Some(pinned) = pinned {
                *value = pinned.to_string();
            }
        }
        if !config.contact.is_configured() {
            log::warn!("mail relay not configured, contact form is disabled");
        }
        config
    }

    fn fallback() -> Self {
        Self {
            backend: BackendConfig { url: String::new() },
            chat: ChatConfig {
                reveal_interval_ms: 50,
                response_delay_ms: 1000,
                scroll_debounce_ms: 100,
                scroll_bottom_threshold_px: 10,
            },
            upload: UploadConfig {
                success_banner_ms: 5000,
                fail_banner_ms: 500,
            },
            auth: AuthConfig {
                redirect_settle_ms: 300,
            },
            contact: ContactConfig {
                endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
                service_id: String::new(),
                template_id: String::new(),
                public_key: String::new(),
                to_email: String::new(),
                status_clear_ms: 5000,
            },
        }
    }

    /// Resolved backend base URL without a trailing slash.
    pub fn backend_base(&self) -> String {
        let configured = self.backend.url.trim().trim_end_matches('/');
        if !configured.is_empty() {
            return configured.to_string();
        }
        let Some(window) = web_sys::window() else {
            return format!("http://127.0.0.1:{}", BACKEND_PORT);
        };
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
    }
}
