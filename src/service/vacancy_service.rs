use crate::db::models::{NewVacancy, SearchHistory, Vacancy};
use crate::error::{VacancyError, VacancyResult};
use crate::service::repository::VacancyRepository;
use std::sync::Arc;

/// Domain-facing entry point used by the HTTP handlers.
///
/// Calls go straight through to the repository; the only translation is turning a
/// missing vacancy into [`VacancyError::NotFound`].
#[derive(Clone)]
pub struct VacancyService {
    repo: Arc<dyn VacancyRepository>,
}

impl VacancyService {
    pub fn new(repo: Arc<dyn VacancyRepository>) -> Self {
        Self { repo }
    }

    pub async fn search_vacancy(&self, query: &str) -> VacancyResult<Vec<Vacancy>> {
        self.repo.search_vacancy(query).await
    }

    pub async fn get_vacancy(&self, id: &str) -> VacancyResult<Vacancy> {
        self.repo
            .get_vacancy(id)
            .await?
            .ok_or_else(|| VacancyError::NotFound {
                entity: "vacancy",
                id: id.to_string(),
            })
    }

    pub async fn list_vacancies(&self) -> VacancyResult<Vec<Vacancy>> {
        self.repo.list_vacancies().await
    }

    pub async fn save_vacancy(&self, vacancy: &NewVacancy) -> VacancyResult<Vacancy> {
        self.repo.save_vacancy(vacancy).await
    }

    pub async fn delete_vacancy(&self, id: &str) -> VacancyResult<()> {
        self.repo.delete_vacancy(id).await
    }

    pub async fn save_search_history(&self, query: &str) -> VacancyResult<()> {
        self.repo.save_search_history(query).await
    }

    pub async fn list_search_history(&self) -> VacancyResult<Vec<SearchHistory>> {
        self.repo.list_search_history().await
    }

    pub async fn delete_search_history(&self, id: i64) -> VacancyResult<()> {
        self.repo.delete_search_history(id).await
    }
}
