use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

/// A question only exists embedded in exactly one quiz; it has no lifecycle
/// of its own.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question_text: String,
    pub question_type: QuestionType,
    /// Empty for true/false questions; those have the two fixed options
    /// True = index 0, False = index 1.
    pub options: Vec<String>,
    /// Indices into `options`, set semantics. Exactly one entry for
    /// single/truefalse questions.
    pub correct_answers: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multiple,
    TrueFalse,
}

impl Quiz {
    pub fn new(title: &str, description: &str, questions: Vec<Question>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            questions,
            created_at: Utc::now(),
        }
    }
}
