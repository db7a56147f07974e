use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::db::sqlite::VacancyStorage;
use crate::handlers::history::{delete_history_handler, list_history_handler};
use crate::handlers::vacancy::{
    delete_handler, get_handler, list_handler, save_handler, search_handler,
};
use crate::service::VacancyService;

#[derive(Clone)]
pub struct RouterState {
    pub service: VacancyService,
}

impl RouterState {
    pub fn new(service: VacancyService) -> Self {
        Self { service }
    }

    pub fn from_storage(storage: VacancyStorage) -> Self {
        Self::new(VacancyService::new(Arc::new(storage)))
    }
}

pub fn router(state: RouterState) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/get/{id}", get(get_handler))
        .route("/list", get(list_handler))
        .route("/save", post(save_handler))
        .route("/delete/{id}", delete(delete_handler))
        .route("/history", get(list_history_handler))
        .route("/history/{id}", delete(delete_history_handler))
        .with_state(state)
}
