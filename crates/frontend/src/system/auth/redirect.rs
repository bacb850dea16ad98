//! Completion of the Google OAuth round trip.
//!
//! The backend redirects to `/google?token=…`, or sets an `auth_token`
//! cookie readable by the page. Either way the credential ends up in the
//! regular credential slot and is verified before the user is let in.

use std::future::Future;

use serde::Deserialize;

use super::session::AuthSession;

const CREDENTIAL_COOKIE: &str = "auth_token";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CallbackQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Parse `location.search`, with or without the leading `?`.
pub fn parse_callback_query(search: &str) -> CallbackQuery {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

/// Value of the credential cookie in a `document.cookie` string.
pub fn credential_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CREDENTIAL_COOKIE)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .filter(|value| !value.is_empty())
}

/// Query parameter first, cookie second.
pub fn extract_credential(search: &str, cookies: &str) -> Option<String> {
    parse_callback_query(search)
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| credential_from_cookies(cookies))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Verified; continue to the chat.
    Landing,
    /// Back to the login page with an error code.
    Login { error: &'static str },
}

impl RedirectOutcome {
    pub fn target(&self) -> String {
        match self {
            RedirectOutcome::Landing => "/chat".to_string(),
            RedirectOutcome::Login { error } => format!("/login?error={}", error),
        }
    }
}

/// Upper bound on extra settle waits while another check is in flight.
const MAX_SETTLE_ROUNDS: usize = 10;

/// Persist the credential, wait for the backend session to settle, verify.
///
/// `settle` produces one bounded pause; it is repeated while a check started
/// elsewhere (the provider's initial check) is still in flight, so the
/// verification below is a real round trip with the new credential.
pub async fn complete_oauth<S, F>(
    session: &AuthSession,
    credential: Option<String>,
    settle: S,
) -> RedirectOutcome
where
    S: Fn() -> F,
    F: Future<Output = ()>,
{
    let Some(token) = credential else {
        log::warn!("OAuth callback carried no credential");
        return RedirectOutcome::Login { error: "no_token" };
    };

    session.store_credential(&token);
    settle().await;
    let mut rounds = 0;
    while session.is_checking() && rounds < MAX_SETTLE_ROUNDS {
        settle().await;
        rounds += 1;
    }

    if session.check_auth().await {
        log::info!("OAuth sign-in completed");
        RedirectOutcome::Landing
    } else {
        log::warn!("OAuth credential failed verification");
        RedirectOutcome::Login {
            error: "token_invalid",
        }
    }
}
