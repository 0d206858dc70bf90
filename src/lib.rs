pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exam_session;
pub mod logger;
pub mod models;
pub mod navigation;
pub mod quiz_round;
pub mod text;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use ai::{ContentProvider, ModelConfig, OpenRouterClient, OpenRouterProvider, DEFAULT_MODEL};
pub use ai_worker::{ContentRequest, ContentResponse, Delivery, FetchWorker, Ticket};
pub use app::{App, AppControl};
pub use catalog::{find_exam, AWS_EXAMS};
pub use config::Config;
pub use error::{ConfigError, NavigationError, ProviderError};
pub use exam_session::{Advance, ExamOutcome, ExamSession, MOCK_QUESTION_COUNT};
pub use models::{Domain, Exam, LanguageMode, MultilingualText, QuizQuestion, StudyModule};
pub use navigation::{NavigationController, Screen, StudyMode, View};
pub use quiz_round::{QuizRound, RoundPhase};
