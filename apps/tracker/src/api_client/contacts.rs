use reqwest::Method;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{ContactRecord, NewContact, RecordId};
use crate::session::Session;

impl ApiClient {
    /// GET /api/contacts
    pub async fn list_contacts(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<ContactRecord>, ApiError> {
        let req = self.request(Method::GET, &["api", "contacts"], session)?;
        self.send_json(req, "fetch contacts").await
    }

    /// GET /api/contacts/:id
    pub async fn get_contact(
        &self,
        session: Option<&Session>,
        id: &RecordId,
    ) -> Result<ContactRecord, ApiError> {
        let id = id.to_string();
        let req = self.request(Method::GET, &["api", "contacts", id.as_str()], session)?;
        self.send_json(req, "fetch contact").await
    }

    /// POST /api/contacts
    pub async fn create_contact(
        &self,
        session: Option<&Session>,
        contact: &NewContact,
    ) -> Result<ContactRecord, ApiError> {
        let req = self
            .request(Method::POST, &["api", "contacts"], session)?
            .json(contact);
        self.send_json(req, "create contact").await
    }

    /// PUT /api/contacts/:id
    pub async fn update_contact(
        &self,
        session: Option<&Session>,
        id: &RecordId,
        contact: &NewContact,
    ) -> Result<ContactRecord, ApiError> {
        let id = id.to_string();
        let req = self
            .request(Method::PUT, &["api", "contacts", id.as_str()], session)?
            .json(contact);
        self.send_json(req, "update contact").await
    }

    /// DELETE /api/contacts/:id
    pub async fn delete_contact(
        &self,
        session: Option<&Session>,
        id: &RecordId,
    ) -> Result<(), ApiError> {
        let id = id.to_string();
        let req = self.request(Method::DELETE, &["api", "contacts", id.as_str()], session)?;
        self.send_empty(req, "delete contact").await
    }
}
