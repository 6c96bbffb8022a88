//! One operation per endpoint. Each maps storage failures to the client error its endpoint uses.

use crate::error::{AppError, StoreError};
use crate::model::{category_map, NewQuestion, Question, SortOrder};
use crate::response::{
    CategoriesBody, CategoryQuestionsBody, CreatedBody, DeletedBody, QuestionListBody, QuizBody, SearchBody,
};
use crate::service::pagination::Page;
use crate::service::validation::QuizRequest;
use crate::store::TriviaStore;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Mutex;

pub struct TriviaService;

impl TriviaService {
    /// All categories as an id -> label map. Not Found when there are none.
    pub async fn categories(store: &dyn TriviaStore) -> Result<CategoriesBody, AppError> {
        let categories = store
            .list_categories()
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        if categories.is_empty() {
            return Err(AppError::NotFound("no categories".into()));
        }
        Ok(CategoriesBody {
            success: true,
            categories: category_map(categories),
        })
    }

    /// Newest questions first. Not Found when the requested page is empty, including an empty bank.
    pub async fn list_questions(store: &dyn TriviaStore, page: Page) -> Result<QuestionListBody, AppError> {
        let categories = store
            .list_categories()
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        let questions = store
            .list_questions(SortOrder::Descending)
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        let total_questions = questions.len();
        let questions = page.take(questions);
        if questions.is_empty() {
            return Err(AppError::NotFound(format!("page {} of {} questions", page.number(), total_questions)));
        }
        Ok(QuestionListBody {
            success: true,
            questions,
            total_questions,
            categories: category_map(categories),
        })
    }

    pub async fn delete_question(store: &dyn TriviaStore, id: i64) -> Result<DeletedBody, AppError> {
        let found = store
            .find_question(id)
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("question {}", id)));
        }
        let deleted = store.delete_question(id).await.map_err(|e| match e {
            StoreError::NotFound { id } => AppError::NotFound(format!("question {}", id)),
            e => AppError::from_store(e, AppError::Unprocessable),
        })?;
        tracing::info!(id = deleted.id, "question deleted");
        Ok(DeletedBody {
            success: true,
            deleted: deleted.id,
        })
    }

    /// Case-insensitive substring search. Not Found only when nothing matches at all; an
    /// out-of-range page yields an empty list.
    pub async fn search_questions(store: &dyn TriviaStore, term: &str, page: Page) -> Result<SearchBody, AppError> {
        let matches = store
            .search_questions(term)
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        if matches.is_empty() {
            return Err(AppError::NotFound(format!("no questions match '{}'", term)));
        }
        let total_questions = matches.len();
        Ok(SearchBody {
            success: true,
            questions: page.take(matches),
            total_questions,
        })
    }

    /// Insert, then return the whole collection by ascending id.
    pub async fn create_question(store: &dyn TriviaStore, new: NewQuestion) -> Result<CreatedBody, AppError> {
        let created = store
            .insert_question(new)
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        tracing::info!(id = created.id, category = created.category, "question created");
        let questions = store
            .list_questions(SortOrder::Ascending)
            .await
            .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        Ok(CreatedBody {
            success: true,
            created: created.id,
            question_created: created.question,
            total_questions: questions.len(),
            questions,
        })
    }

    /// Bad Request (not Not Found) when the category does not exist. Any page, even empty, succeeds.
    pub async fn category_questions(
        store: &dyn TriviaStore,
        category_id: i64,
        page: Page,
    ) -> Result<CategoryQuestionsBody, AppError> {
        let category = store
            .find_category(category_id)
            .await
            .map_err(|e| AppError::from_store(e, AppError::BadRequest))?
            .ok_or_else(|| AppError::BadRequest(format!("category {}", category_id)))?;
        let questions = store
            .questions_by_category(category.id)
            .await
            .map_err(|e| AppError::from_store(e, AppError::BadRequest))?;
        let total_questions = questions.len();
        Ok(CategoryQuestionsBody {
            success: true,
            questions: page.take(questions),
            total_questions,
            current_category: category.kind,
        })
    }

    /// Random unseen question from the requested category (or all). `{success: false}` when exhausted.
    pub async fn play_quiz<R: Rng>(
        store: &dyn TriviaStore,
        request: &QuizRequest,
        rng: &Mutex<R>,
    ) -> Result<QuizBody, AppError> {
        let candidates = match request.category {
            Some(id) => store.questions_by_category(id).await,
            None => store.list_questions(SortOrder::Ascending).await,
        }
        .map_err(|e| AppError::from_store(e, AppError::Unprocessable))?;
        let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = pick_unseen(candidates, &request.previous_questions, &mut *rng);
        tracing::debug!(
            category = ?request.category,
            seen = request.previous_questions.len(),
            picked = ?next.as_ref().map(|q| q.id),
            "quiz question"
        );
        Ok(QuizBody::next(next))
    }
}

/// Uniformly pick one question whose id is not in `seen`.
pub fn pick_unseen<R: Rng + ?Sized>(candidates: Vec<Question>, seen: &HashSet<i64>, rng: &mut R) -> Option<Question> {
    let eligible: Vec<Question> = candidates.into_iter().filter(|q| !seen.contains(&q.id)).collect();
    eligible.choose(rng).cloned()
}
