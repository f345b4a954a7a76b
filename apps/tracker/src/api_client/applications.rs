use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    ApplicationRecord, ApplicationUpdate, NewApplication, NewTimelineEntry, RecordId,
    TimelineEntry,
};
use crate::session::Session;

/// Timeline bodies also carry the owning application.
#[derive(Serialize)]
struct TimelineBody<'a> {
    application_id: &'a RecordId,
    #[serde(flatten)]
    entry: &'a NewTimelineEntry,
}

impl ApiClient {
    /// GET /api/applications
    pub async fn list_applications(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<ApplicationRecord>, ApiError> {
        let req = self.request(Method::GET, &["api", "applications"], session)?;
        self.send_json_list(req, "fetch applications").await
    }

    /// GET /api/applications/:id
    pub async fn get_application(
        &self,
        session: Option<&Session>,
        id: &RecordId,
    ) -> Result<ApplicationRecord, ApiError> {
        let id = id.to_string();
        let req = self.request(Method::GET, &["api", "applications", id.as_str()], session)?;
        self.send_json(req, "fetch application").await
    }

    /// POST /api/applications
    pub async fn create_application(
        &self,
        session: Option<&Session>,
        application: &NewApplication,
    ) -> Result<ApplicationRecord, ApiError> {
        let req = self
            .request(Method::POST, &["api", "applications"], session)?
            .json(application);
        self.send_json(req, "create application").await
    }

    /// PUT /api/applications/:id
    pub async fn update_application(
        &self,
        session: Option<&Session>,
        id: &RecordId,
        update: &ApplicationUpdate,
    ) -> Result<ApplicationRecord, ApiError> {
        let id = id.to_string();
        let req = self
            .request(Method::PUT, &["api", "applications", id.as_str()], session)?
            .json(update);
        self.send_json(req, "update application").await
    }

    /// DELETE /api/applications/:id
    pub async fn delete_application(
        &self,
        session: Option<&Session>,
        id: &RecordId,
    ) -> Result<(), ApiError> {
        let id = id.to_string();
        let req = self.request(
            Method::DELETE,
            &["api", "applications", id.as_str()],
            session,
        )?;
        self.send_empty(req, "delete application").await
    }

    /// GET /api/applications/:id/timeline
    pub async fn get_timeline(
        &self,
        session: Option<&Session>,
        id: &RecordId,
    ) -> Result<Vec<TimelineEntry>, ApiError> {
        let id = id.to_string();
        let req = self.request(
            Method::GET,
            &["api", "applications", id.as_str(), "timeline"],
            session,
        )?;
        self.send_json_list(req, "fetch timeline").await
    }

    /// POST /api/applications/:id/timeline
    pub async fn add_timeline_entry(
        &self,
        session: Option<&Session>,
        id: &RecordId,
        entry: &NewTimelineEntry,
    ) -> Result<TimelineEntry, ApiError> {
        let body = TimelineBody {
            application_id: id,
            entry,
        };
        let id = id.to_string();
        let req = self
            .request(
                Method::POST,
                &["api", "applications", id.as_str(), "timeline"],
                session,
            )?
            .json(&body);
        self.send_json(req, "add timeline entry").await
    }

    /// PUT /api/applications/:id/timeline/:entry_id
    pub async fn update_timeline_entry(
        &self,
        session: Option<&Session>,
        id: &RecordId,
        entry_id: &RecordId,
        entry: &NewTimelineEntry,
    ) -> Result<TimelineEntry, ApiError> {
        let body = TimelineBody {
            application_id: id,
            entry,
        };
        let (id, entry_id) = (id.to_string(), entry_id.to_string());
        let req = self
            .request(
                Method::PUT,
                &["api", "applications", id.as_str(), "timeline", entry_id.as_str()],
                session,
            )?
            .json(&body);
        self.send_json(req, "update timeline entry").await
    }

    /// DELETE /api/applications/:id/timeline/:entry_id
    pub async fn delete_timeline_entry(
        &self,
        session: Option<&Session>,
        id: &RecordId,
        entry_id: &RecordId,
    ) -> Result<(), ApiError> {
        let (id, entry_id) = (id.to_string(), entry_id.to_string());
        let req = self.request(
            Method::DELETE,
            &["api", "applications", id.as_str(), "timeline", entry_id.as_str()],
            session,
        )?;
        self.send_empty(req, "delete timeline entry").await
    }
}
