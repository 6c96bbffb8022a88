//! Trivia API: question bank REST backend over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Category, NewQuestion, Question, SortOrder};
pub use routes::{app, common_routes, cors_layer, trivia_routes};
pub use service::{Page, TriviaService, QUESTIONS_PER_PAGE};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, TriviaStore};
