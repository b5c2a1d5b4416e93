use axum::response::Json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::api::HealthResponse;

/// Liveness only; the venue is not contacted.
pub async fn health_check() -> Json<HealthResponse> {
    let now = OffsetDateTime::now_utc();

    Json(HealthResponse {
        status: "OK",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now
            .format(&Rfc3339)
            .unwrap_or_else(|_| now.unix_timestamp().to_string()),
    })
}
