pub mod auth_service;
pub mod quiz_service;
pub mod score_service;
pub mod scoring;

pub use auth_service::AuthService;
pub use quiz_service::QuizService;
pub use score_service::ScoreService;
pub use scoring::ScoringEngine;
