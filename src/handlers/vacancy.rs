use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::warn;

use crate::db::models::{NewVacancy, Vacancy};
use crate::{VacancyError, router::RouterState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// GET /search?query= -> vacancies whose title contains `query`.
/// The query is also appended to the search history; failing to do so only logs.
pub async fn search_handler(
    State(state): State<RouterState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vacancy>>, VacancyError> {
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return Err(VacancyError::MissingParameter("query"));
    };

    let vacancies = state.service.search_vacancy(&query).await?;

    if let Err(e) = state.service.save_search_history(&query).await {
        warn!(query = %query, error = %e, "failed to save search history");
    }

    Ok(Json(vacancies))
}

/// GET /get/{id}
pub async fn get_handler(
    State(state): State<RouterState>,
    Path(id): Path<String>,
) -> Result<Json<Vacancy>, VacancyError> {
    let vacancy = state.service.get_vacancy(&id).await?;
    Ok(Json(vacancy))
}

/// GET /list
pub async fn list_handler(
    State(state): State<RouterState>,
) -> Result<Json<Vec<Vacancy>>, VacancyError> {
    Ok(Json(state.service.list_vacancies().await?))
}

/// POST /save -> stores the posted vacancy and echoes it back with its id.
pub async fn save_handler(
    State(state): State<RouterState>,
    Json(body): Json<NewVacancy>,
) -> Result<Json<Vacancy>, VacancyError> {
    let stored = state.service.save_vacancy(&body).await?;
    Ok(Json(stored))
}

/// DELETE /delete/{id}
pub async fn delete_handler(
    State(state): State<RouterState>,
    Path(id): Path<String>,
) -> Result<StatusCode, VacancyError> {
    state.service.delete_vacancy(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
