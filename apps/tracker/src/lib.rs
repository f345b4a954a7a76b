pub mod api_client;
pub mod config;
pub mod errors;
pub mod flow;
pub mod models;
pub mod session;
pub mod stats;

pub use api_client::ApiClient;
pub use config::Config;
pub use errors::ApiError;
pub use flow::{build_status_flow, load_status_flow, FlowEdge, FlowNode, StatusFlow, TrackerSource};
pub use session::Session;
pub use stats::DashboardStats;
