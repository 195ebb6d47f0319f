pub mod quiz_repository;
pub mod score_repository;
pub mod user_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use score_repository::{MongoScoreRepository, ScoreRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
