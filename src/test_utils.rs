use crate::models::domain::{Question, QuestionType, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Two-question quiz covering the single and multiple grading paths.
    pub fn capitals_quiz() -> Quiz {
        Quiz::new(
            "Capitals",
            "European capitals",
            vec![
                Question {
                    question_text: "Capital of France?".to_string(),
                    question_type: QuestionType::Single,
                    options: vec!["London".to_string(), "Paris".to_string()],
                    correct_answers: vec![1],
                },
                Question {
                    question_text: "Which are in Spain?".to_string(),
                    question_type: QuestionType::Multiple,
                    options: vec![
                        "Madrid".to_string(),
                        "Lisbon".to_string(),
                        "Seville".to_string(),
                    ],
                    correct_answers: vec![0, 2],
                },
            ],
        )
    }

    /// Single-question true/false quiz.
    pub fn truefalse_quiz() -> Quiz {
        Quiz::new(
            "True or false",
            "",
            vec![Question {
                question_text: "The sky is green.".to_string(),
                question_type: QuestionType::TrueFalse,
                options: vec![],
                correct_answers: vec![1],
            }],
        )
    }
}
