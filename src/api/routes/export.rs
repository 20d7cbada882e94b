//! Export Routes
//!
//! Ranked view export for spreadsheets and scripts.
//!
//! - GET /api/v1/export?format=csv|json - Download the ranked view

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::integrations::ExportFormat;

/// GET /api/v1/export
///
/// Export the ranked view in the requested format as an attachment.
pub async fn export_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let format: ExportFormat = params.format.parse().map_err(ApiError::Validation)?;

    let ranked = state.roster.ranked().await;
    let body = format
        .render(&ranked)
        .map_err(|e| ApiError::Internal(format!("Export failed: {}", e)))?;

    tracing::info!(rows = ranked.len(), format = format.extension(), "Ranking exported");

    let filename = format!(
        "tally_ranking_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
