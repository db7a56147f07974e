use crate::db::models::{NewVacancy, SearchHistory, Vacancy};
use crate::db::schema::{
    HISTORY_COLUMNS, VACANCY_COLUMNS, contains_pattern, contains_predicate, init_statements,
    parse_vacancy_id, title_contains,
};
use crate::error::VacancyResult;
use crate::service::repository::VacancyRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url`, creating the database file if it does not exist.
pub async fn connect(database_url: &str, max_connections: u32) -> VacancyResult<SqlitePool> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct VacancyStorage {
    pool: SqlitePool,
}

impl VacancyStorage {
    /// Wrap `pool` and make sure both tables exist.
    pub async fn open(pool: SqlitePool) -> VacancyResult<Self> {
        let storage = Self { pool };
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> VacancyResult<()> {
        for stmt in init_statements() {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    fn row_to_history(row: SqliteRow) -> VacancyResult<SearchHistory> {
        let id: i64 = row.try_get("id")?;
        let query: String = row.try_get("query")?;
        let timestamp_str: String = row.try_get("timestamp")?;

        let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(SearchHistory {
            id,
            query,
            timestamp,
        })
    }
}

#[async_trait]
impl VacancyRepository for VacancyStorage {
    async fn search_vacancy(&self, query: &str) -> VacancyResult<Vec<Vacancy>> {
        let rows: Vec<Vacancy> = if query.is_ascii() {
            let sql = format!(
                "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE {}",
                contains_predicate("title")
            );
            sqlx::query_as(&sql)
                .bind(contains_pattern(query))
                .fetch_all(&self.pool)
                .await?
        } else {
            // SQLite's LIKE only folds ASCII case.
            self.list_vacancies()
                .await?
                .into_iter()
                .filter(|v| title_contains(&v.title, query))
                .collect()
        };
        debug!(query, matches = rows.len(), "vacancy search");
        Ok(rows)
    }

    async fn get_vacancy(&self, id: &str) -> VacancyResult<Option<Vacancy>> {
        let Some(row_id) = parse_vacancy_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = ?");
        let row = sqlx::query_as(&sql)
            .bind(row_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_vacancies(&self) -> VacancyResult<Vec<Vacancy>> {
        let sql = format!("SELECT {VACANCY_COLUMNS} FROM vacancies");
        let rows: Vec<Vacancy> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn save_vacancy(&self, vacancy: &NewVacancy) -> VacancyResult<Vacancy> {
        let sql = format!(
            "INSERT INTO vacancies (title, company, location, description) \
             VALUES (?, ?, ?, ?) RETURNING {VACANCY_COLUMNS}"
        );
        let stored: Vacancy = sqlx::query_as(&sql)
            .bind(&vacancy.title)
            .bind(&vacancy.company)
            .bind(&vacancy.location)
            .bind(&vacancy.description)
            .fetch_one(&self.pool)
            .await?;
        debug!(id = %stored.id, title = %stored.title, "vacancy saved");
        Ok(stored)
    }

    async fn delete_vacancy(&self, id: &str) -> VacancyResult<()> {
        let Some(row_id) = parse_vacancy_id(id) else {
            debug!(id, "vacancy delete skipped for non-canonical id");
            return Ok(());
        };
        let res = sqlx::query("DELETE FROM vacancies WHERE id = ?")
            .bind(row_id)
            .execute(&self.pool)
            .await?;
        debug!(id, affected = res.rows_affected(), "vacancy delete");
        Ok(())
    }

    async fn save_search_history(&self, query: &str) -> VacancyResult<()> {
        sqlx::query("INSERT INTO search_history (query) VALUES (?)")
            .bind(query)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_search_history(&self) -> VacancyResult<Vec<SearchHistory>> {
        let sql = format!("SELECT {HISTORY_COLUMNS} FROM search_history");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_history).collect()
    }

    async fn delete_search_history(&self, id: i64) -> VacancyResult<()> {
        let res = sqlx::query("DELETE FROM search_history WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, affected = res.rows_affected(), "search history delete");
        Ok(())
    }
}
