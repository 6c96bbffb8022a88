//! PostgreSQL-backed store and table bootstrap.

use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, SortOrder};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Labels inserted with ids 1..=6 when category seeding is enabled and the table is empty.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create `categories` and `questions` if they do not exist. No foreign key: a question may
    /// reference a category id that is absent.
    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id BIGSERIAL PRIMARY KEY,
                type TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id BIGSERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                difficulty INTEGER NOT NULL,
                category BIGINT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert [`DEFAULT_CATEGORIES`] when the categories table is empty. Returns rows inserted.
    pub async fn seed_default_categories(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(0);
        }
        let mut inserted = 0u64;
        for (i, label) in DEFAULT_CATEGORIES.iter().enumerate() {
            sqlx::query("INSERT INTO categories (id, type) VALUES ($1, $2)")
                .bind(i as i64 + 1)
                .bind(*label)
                .execute(&self.pool)
                .await?;
            inserted += 1;
        }
        // Keep BIGSERIAL ahead of the explicit ids.
        sqlx::query("SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))")
            .execute(&self.pool)
            .await?;
        Ok(inserted)
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let sql = "SELECT id, type FROM categories ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Category>(sql).fetch_all(&self.pool).await?)
    }

    async fn list_questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError> {
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let sql = format!("SELECT {} FROM questions ORDER BY id {}", QUESTION_COLUMNS, direction);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Question>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let sql = "SELECT id, type FROM categories WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Category>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE category = $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        tracing::debug!(sql = %sql, category_id, "query");
        Ok(sqlx::query_as::<_, Question>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            r"SELECT {} FROM questions WHERE question ILIKE '%' || $1 || '%' ESCAPE '\' ORDER BY id",
            QUESTION_COLUMNS
        );
        let pattern = escape_like(term);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        Ok(sqlx::query_as::<_, Question>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let sql = format!(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Question>(&sql)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.difficulty)
            .bind(question.category)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete_question(&self, id: i64) -> Result<Question, StoreError> {
        let sql = format!("DELETE FROM questions WHERE id = $1 RETURNING {}", QUESTION_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Escape LIKE metacharacters so the term matches as a literal substring.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::Unavailable(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::Unavailable("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
