use std::collections::BTreeSet;

use crate::models::domain::{Answer, Question, QuestionType};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Grade a submission against a quiz definition.
    ///
    /// Answers align with questions by position; a short submission leaves
    /// trailing questions unanswered. Unanswered or shape-mismatched
    /// entries grade as incorrect, never as an error. Pure and
    /// deterministic: identical inputs always produce the identical score,
    /// bounded by the question count.
    pub fn evaluate(questions: &[Question], answers: &[Answer]) -> i32 {
        questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                let answer = answers.get(*index).unwrap_or(&Answer::Unanswered);
                Self::is_correct(question, answer)
            })
            .count() as i32
    }

    fn is_correct(question: &Question, answer: &Answer) -> bool {
        match (question.question_type, answer) {
            (QuestionType::Single | QuestionType::TrueFalse, Answer::Single(chosen)) => {
                question.correct_answers.len() == 1 && question.correct_answers[0] == *chosen
            }
            (QuestionType::Multiple, Answer::Multiple(chosen)) => {
                let correct: BTreeSet<usize> = question.correct_answers.iter().copied().collect();
                *chosen == correct
            }
            _ => false,
        }
    }
}
