use std::collections::HashSet;
use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionType, Quiz},
        dto::{
            request::{CreateQuizRequest, QuestionInput},
            response::{QuizDetailResponse, QuizSummaryResponse},
        },
    },
    repositories::{QuizRepository, ScoreRepository},
};

/// True/false questions have the two fixed options True = 0, False = 1.
const TRUEFALSE_OPTION_COUNT: usize = 2;

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    score_repository: Arc<dyn ScoreRepository>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            score_repository,
        }
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let questions = request
            .questions
            .iter()
            .enumerate()
            .map(|(position, input)| Self::build_question(position, input))
            .collect::<AppResult<Vec<Question>>>()?;

        let quiz = Quiz::new(&request.title, &request.description, questions);
        let quiz = self.quiz_repository.insert(quiz).await?;

        log::info!(
            "Created quiz '{}' with {} questions",
            quiz.title,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// Check the structural invariants of one submitted question, reporting
    /// the first violation. Positions are 1-based in messages.
    fn build_question(position: usize, input: &QuestionInput) -> AppResult<Question> {
        let number = position + 1;

        if input.question_text.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question {} has no text",
                number
            )));
        }

        let option_count = match input.question_type {
            QuestionType::Single | QuestionType::Multiple => {
                if input.options.is_empty() {
                    return Err(AppError::ValidationError(format!(
                        "Question {} has no options",
                        number
                    )));
                }
                input.options.len()
            }
            QuestionType::TrueFalse => TRUEFALSE_OPTION_COUNT,
        };

        if input.correct_answers.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question {} has no correct answers",
                number
            )));
        }

        let distinct: HashSet<usize> = input.correct_answers.iter().copied().collect();
        if distinct.len() != input.correct_answers.len() {
            return Err(AppError::ValidationError(format!(
                "Question {} lists a correct answer more than once",
                number
            )));
        }

        match input.question_type {
            QuestionType::Single | QuestionType::TrueFalse => {
                if input.correct_answers.len() != 1 {
                    return Err(AppError::ValidationError(format!(
                        "Question {} must have exactly one correct answer",
                        number
                    )));
                }
            }
            QuestionType::Multiple => {}
        }

        if let Some(out_of_range) = input
            .correct_answers
            .iter()
            .find(|&&index| index >= option_count)
        {
            return Err(AppError::ValidationError(format!(
                "Question {} correct answer index {} is out of range",
                number, out_of_range
            )));
        }

        let options = match input.question_type {
            QuestionType::TrueFalse => vec![],
            _ => input.options.clone(),
        };

        Ok(Question {
            question_text: input.question_text.clone(),
            question_type: input.question_type,
            options,
            correct_answers: input.correct_answers.clone(),
        })
    }

    /// Public listing: titles and counts only, no answer data.
    pub async fn list_summaries(&self) -> AppResult<Vec<QuizSummaryResponse>> {
        let quizzes = self.quiz_repository.find_all().await?;
        Ok(quizzes.iter().map(QuizSummaryResponse::from).collect())
    }

    /// Public fetch for taking a quiz: the stored definition with
    /// `correct_answers` stripped.
    pub async fn get_for_taking(&self, id: &str) -> AppResult<QuizDetailResponse> {
        let quiz = self.get_quiz(id).await?;
        Ok(QuizDetailResponse::from(&quiz))
    }

    /// The answer-bearing definition. Server-side consumers only: the
    /// scoring path and the admin listing.
    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quiz_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn list_full(&self) -> AppResult<Vec<Quiz>> {
        self.quiz_repository.find_all().await
    }

    /// Cascade delete. Scores go first: if the operation dies in the
    /// middle, the store is left with orphaned scores awaiting cleanup
    /// rather than scores pointing at a quiz that no longer exists.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        // Existence check up front so a missing id is a 404, not a partial
        // cascade.
        self.get_quiz(id).await?;

        let removed = self.score_repository.delete_by_quiz(id).await?;
        self.quiz_repository.delete(id).await?;

        log::info!("Deleted quiz '{}' and {} associated scores", id, removed);
        Ok(())
    }
}
