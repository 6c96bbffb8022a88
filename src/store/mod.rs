//! Question and category repository. Handlers receive a `TriviaStore` through [`AppState`](crate::AppState).

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore, DEFAULT_CATEGORIES};

use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, SortOrder};
use async_trait::async_trait;

#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Full question scan ordered by id. Callers paginate.
    async fn list_questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError>;

    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, StoreError>;

    /// Questions whose category equals `category_id`, ordered by id.
    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, StoreError>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// Insert and return the question with its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Remove the question. `StoreError::NotFound` when no such id exists.
    async fn delete_question(&self, id: i64) -> Result<Question, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
