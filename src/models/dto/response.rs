use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, QuestionType, Quiz, User};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id.clone(),
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub question_count: usize,
}

impl From<&Quiz> for QuizSummaryResponse {
    fn from(quiz: &Quiz) -> Self {
        QuizSummaryResponse {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            question_count: quiz.questions.len(),
        }
    }
}

/// A question as served to quiz-taking clients. Deliberately omits
/// `correct_answers`; the answer-bearing definition never leaves the server
/// except through the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        QuestionView {
            question_text: question.question_text.clone(),
            question_type: question.question_type,
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetailResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionView>,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizDetailResponse {
    fn from(quiz: &Quiz) -> Self {
        QuizDetailResponse {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz.questions.iter().map(QuestionView::from).collect(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub score: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i32,
    pub total: i32,
    pub quiz_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryEntry {
    pub username: String,
    pub quiz_title: String,
    pub score: i32,
    pub total: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
