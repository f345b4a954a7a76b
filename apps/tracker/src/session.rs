use crate::models::TokenResponse;

/// An authenticated session with the backend.
///
/// Only `ApiClient::login` creates one and `ApiClient::logout` consumes it, so
/// a logged-out session cannot be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
    access_token: String,
    token_type: String,
}

impl Session {
    pub(crate) fn from_token(email: &str, token: TokenResponse) -> Self {
        let token_type = token
            .token_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Bearer".to_string());
        Self {
            email: email.to_string(),
            access_token: token.access_token,
            token_type,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
