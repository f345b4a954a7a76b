use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::RoleInsight;
use crate::session::Session;

impl ApiClient {
    /// GET /api/role-insights
    pub async fn role_insights(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<RoleInsight>, ApiError> {
        let req = self.request(Method::GET, &["api", "role-insights"], session)?;
        self.send_json(req, "fetch role insights").await
    }
}
