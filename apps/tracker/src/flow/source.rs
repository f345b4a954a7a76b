use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::flow::{build_status_flow, StatusFlow};
use crate::models::{ApplicationRecord, RecordId, TimelineEntry};

/// Anything that can deliver applications and their timelines.
///
/// `ApiClient` implements this over REST (see `api_client::SessionSource`);
/// tests use an in-memory implementation.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    async fn applications(&self) -> Result<Vec<ApplicationRecord>, ApiError>;

    async fn timeline(&self, application_id: &RecordId) -> Result<Vec<TimelineEntry>, ApiError>;
}

/// Fetches every application and its timeline, then aggregates the flow.
///
/// Transport errors surface to the caller. Data-quality problems do not: they
/// end up as an invalid `StatusFlow`.
pub async fn load_status_flow(source: &dyn TrackerSource) -> Result<StatusFlow, ApiError> {
    let applications = source.applications().await?;

    let mut timelines = Vec::new();
    for app in &applications {
        let mut entries = source.timeline(&app.id).await?;
        // Older backends omit the owner on per-application listings.
        for entry in entries.iter_mut() {
            if entry.application_id.is_none() {
                entry.application_id = Some(app.id.clone());
            }
        }
        debug!(application_id = %app.id, entries = entries.len(), "timeline fetched");
        timelines.extend(entries);
    }

    let flow = build_status_flow(&applications, &timelines);
    info!(
        applications = applications.len(),
        timeline_entries = timelines.len(),
        nodes = flow.nodes.len(),
        edges = flow.edges.len(),
        valid = flow.has_valid_data,
        "status flow built"
    );
    Ok(flow)
}
