use async_trait::async_trait;

use crate::db::models::{NewVacancy, SearchHistory, Vacancy};
use crate::error::VacancyResult;

/// Storage capability behind [`VacancyService`](super::VacancyService).
///
/// Lookups that match nothing return `Ok(None)`; `Err` is reserved for store failures.
/// Deleting an id that does not exist succeeds.
#[async_trait]
pub trait VacancyRepository: Send + Sync {
    /// Vacancies whose title contains `query`, ignoring case.
    async fn search_vacancy(&self, query: &str) -> VacancyResult<Vec<Vacancy>>;

    async fn get_vacancy(&self, id: &str) -> VacancyResult<Option<Vacancy>>;

    async fn list_vacancies(&self) -> VacancyResult<Vec<Vacancy>>;

    /// Insert and return the stored row, including its assigned id.
    async fn save_vacancy(&self, vacancy: &NewVacancy) -> VacancyResult<Vacancy>;

    async fn delete_vacancy(&self, id: &str) -> VacancyResult<()>;

    async fn save_search_history(&self, query: &str) -> VacancyResult<()>;

    async fn list_search_history(&self) -> VacancyResult<Vec<SearchHistory>>;

    async fn delete_search_history(&self, id: i64) -> VacancyResult<()>;
}
