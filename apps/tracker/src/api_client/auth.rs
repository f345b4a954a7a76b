use reqwest::Method;
use tracing::info;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{Credentials, RegisterRequest, TokenResponse, UserSkills};
use crate::session::Session;

impl ApiClient {
    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let req = self.request(Method::POST, &["auth", "register"], None)?.json(request);
        self.send_empty(req, "register").await?;
        info!("registered {}", request.email);
        Ok(())
    }

    /// POST /auth/login, form-encoded. Returns the session for later calls.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let req = self.request(Method::POST, &["auth", "login"], None)?.form(&form);
        let token: TokenResponse = self.send_json(req, "login").await?;
        info!("logged in as {}", credentials.email);
        Ok(Session::from_token(&credentials.email, token))
    }

    /// POST /auth/logout. Consumes the session whether or not the backend
    /// accepts the request.
    pub async fn logout(&self, session: Session) -> Result<(), ApiError> {
        let req = self.request(Method::POST, &["auth", "logout"], Some(&session))?;
        self.send_empty(req, "logout").await?;
        info!("logged out {}", session.email());
        Ok(())
    }

    /// PUT /auth/skills
    pub async fn update_skills(
        &self,
        session: &Session,
        skills: &[String],
    ) -> Result<(), ApiError> {
        let body = UserSkills {
            skills: skills.to_vec(),
        };
        let req = self
            .request(Method::PUT, &["auth", "skills"], Some(session))?
            .json(&body);
        self.send_empty(req, "update skills").await
    }
}
