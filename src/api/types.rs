use serde::{Deserialize, Serialize};
use crate::models::SortOrder;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Rolling window size, defaults to 24 hours.
    pub hours: Option<i64>,
    pub order: Option<SortOrder>,
    pub debug: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
