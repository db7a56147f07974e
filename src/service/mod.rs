pub mod repository;
pub mod vacancy_service;

pub use repository::VacancyRepository;
pub use vacancy_service::VacancyService;
