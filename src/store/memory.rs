//! In-process store. Backs the integration tests; ids are assigned sequentially like BIGSERIAL.

use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, SortOrder};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_question_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// When set, every call fails with `StoreError::Unavailable`.
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, id: i64, kind: &str) -> Self {
        if let Ok(mut t) = self.tables.lock() {
            t.categories.insert(id, Category { id, kind: kind.to_string() });
        }
        self
    }

    /// Insert a question with a fixed id. Later inserts continue after the highest id seen.
    pub fn with_question(self, question: Question) -> Self {
        if let Ok(mut t) = self.tables.lock() {
            t.next_question_id = t.next_question_id.max(question.id);
            t.questions.insert(question.id, question);
        }
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables()?.categories.values().cloned().collect())
    }

    async fn list_questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError> {
        let t = self.tables()?;
        let questions = t.questions.values().cloned();
        Ok(match order {
            SortOrder::Ascending => questions.collect(),
            SortOrder::Descending => questions.rev().collect(),
        })
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        Ok(self.tables()?.questions.get(&id).cloned())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        Ok(self.tables()?.categories.get(&id).cloned())
    }

    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .tables()?
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        Ok(self
            .tables()?
            .questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut t = self.tables()?;
        t.next_question_id += 1;
        let created = question.with_id(t.next_question_id);
        t.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_question(&self, id: i64) -> Result<Question, StoreError> {
        self.tables()?
            .questions
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }
}
