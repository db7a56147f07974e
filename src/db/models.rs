use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored job posting. `id` is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

/// Vacancy fields supplied by the caller on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NewVacancy {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHistory {
    pub id: i64,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

