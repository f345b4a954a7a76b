pub mod application;
pub mod auth;
pub mod contact;
pub mod insight;
pub mod timeline;

pub use application::{ApplicationRecord, ApplicationUpdate, NewApplication, RecordId};
pub use auth::{Credentials, RegisterRequest, TokenResponse, UserSkills};
pub use contact::{ContactRecord, NewContact};
pub use insight::RoleInsight;
pub use timeline::{NewTimelineEntry, TimelineEntry};

use serde::{Deserialize, Deserializer};

/// The backend returns `null` for empty array columns.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
