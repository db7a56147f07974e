use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::db::models::SearchHistory;
use crate::{VacancyError, router::RouterState};

/// GET /history
pub async fn list_history_handler(
    State(state): State<RouterState>,
) -> Result<Json<Vec<SearchHistory>>, VacancyError> {
    Ok(Json(state.service.list_search_history().await?))
}

/// DELETE /history/{id} -> 204 whether or not the entry existed.
pub async fn delete_history_handler(
    State(state): State<RouterState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, VacancyError> {
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| VacancyError::InvalidParameter {
            name: "history id",
            value: raw_id.clone(),
        })?;
    state.service.delete_search_history(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
