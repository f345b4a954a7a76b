use async_trait::async_trait;

use super::ApiClient;
use crate::errors::ApiError;
use crate::flow::TrackerSource;
use crate::models::{ApplicationRecord, RecordId, TimelineEntry};
use crate::session::Session;

/// `ApiClient` paired with the session its requests should carry.
pub struct SessionSource<'a> {
    client: &'a ApiClient,
    session: Option<&'a Session>,
}

impl<'a> SessionSource<'a> {
    pub fn new(client: &'a ApiClient, session: Option<&'a Session>) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl<'a> TrackerSource for SessionSource<'a> {
    async fn applications(&self) -> Result<Vec<ApplicationRecord>, ApiError> {
        self.client.list_applications(self.session).await
    }

    async fn timeline(&self, application_id: &RecordId) -> Result<Vec<TimelineEntry>, ApiError> {
        self.client.get_timeline(self.session, application_id).await
    }
}
