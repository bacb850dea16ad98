use serde::{Deserialize, Serialize};

use crate::shared::lenient::string_or_number;

/// Identity returned by the backend once a credential has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// `GET /protected`
///
/// A 200 response without `user` is treated as a malformed payload by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedResponse {
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// `GET /auth/google/url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthUrlResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_response_with_user() {
        let json = r#"{"user":{"id":101,"email":"ada@example.com","name":"Ada"}}"#;
        let resp: ProtectedResponse = serde_json::from_str(json).unwrap();
        let user = resp.user.unwrap();
        assert_eq!(user.id, "101");
        assert_eq!(user.name, "Ada");
        assert!(user.picture.is_none());
    }

    #[test]
    fn test_protected_response_without_user() {
        let resp: ProtectedResponse = serde_json::from_str(r#"{"detail":"ok"}"#).unwrap();
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_user_info_omits_missing_picture() {
        let user = UserInfo {
            id: "u1".into(),
            email: "u1@example.com".into(),
            name: "U One".into(),
            picture: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("picture"));
        let back: UserInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
