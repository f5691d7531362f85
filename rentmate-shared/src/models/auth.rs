use serde::{Deserialize, Serialize};

/// Request to sign in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
}

/// Request to create a tenant or owner account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Optional name shown in the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_omits_missing_display_name() {
        let request = SignupRequest {
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
            display_name: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("display_name").is_none());
        assert_eq!(json["email"], "new@example.com");
    }
}
