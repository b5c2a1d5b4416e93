use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::{AppState, ErrorResponse, StatsQuery};
use crate::error::Error;
use crate::models::StatsReport;
use crate::processor::ReportRequest;
use crate::DEFAULT_WINDOW_HOURS;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &Error) -> ApiError {
    let status = match err {
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            detail: err.detail(),
        }),
    )
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsReport>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!("Rejected stats query: {}", rejection);
        error_response(&Error::InvalidRequest(rejection.body_text()))
    })?;

    let request = ReportRequest {
        window_hours: params.hours.unwrap_or(DEFAULT_WINDOW_HOURS),
        order: params.order.unwrap_or_default(),
        debug: params.debug.unwrap_or(false),
    };

    info!(
        "Fetching builder stats for {}h window, {} order",
        request.window_hours, request.order
    );

    let report = state.processor.build_report(request).await.map_err(|e| {
        match &e {
            Error::InvalidRequest(msg) => warn!("Invalid stats request: {}", msg),
            other => error!("Failed to build stats report: {}", other),
        }
        error_response(&e)
    })?;

    Ok(Json(report))
}
