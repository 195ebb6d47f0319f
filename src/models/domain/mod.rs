pub mod quiz;
pub mod score;
pub mod user;

pub use quiz::{Question, QuestionType, Quiz};
pub use score::{Answer, Score};
pub use user::User;
