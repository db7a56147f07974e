//! Database module: row models, schema and the SQLite-backed repository.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL, column projections and predicate helpers
//! - `sqlite.rs`: pool setup and the `VacancyRepository` implementation

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{NewVacancy, SearchHistory, Vacancy};
pub use sqlite::{SqlitePool, VacancyStorage, connect};
