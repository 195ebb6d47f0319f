use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, Score},
        dto::response::{LeaderboardEntry, ScoreHistoryEntry, SubmitResponse},
    },
    repositories::{QuizRepository, ScoreRepository, UserRepository},
    services::scoring::ScoringEngine,
};

pub const LEADERBOARD_LIMIT: i64 = 20;

pub struct ScoreService {
    score_repository: Arc<dyn ScoreRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ScoreService {
    pub fn new(
        score_repository: Arc<dyn ScoreRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            score_repository,
            quiz_repository,
            user_repository,
        }
    }

    /// Grade one submission against the stored quiz definition and record
    /// the attempt. Every submission appends its own record; repeat
    /// attempts by the same user are allowed and independent.
    pub async fn submit(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: &[Answer],
    ) -> AppResult<SubmitResponse> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let score = ScoringEngine::evaluate(&quiz.questions, answers);
        let total = quiz.questions.len() as i32;

        self.score_repository
            .append(Score::new(user_id, quiz_id, score, total))
            .await?;

        log::info!(
            "User '{}' scored {}/{} on quiz '{}'",
            user_id,
            score,
            total,
            quiz_id
        );
        Ok(SubmitResponse { score, total })
    }

    /// Top attempts, highest score first, ties broken by earliest
    /// submission. Usernames are resolved here into a flat DTO; nothing
    /// downstream touches the user store.
    pub async fn leaderboard(&self, quiz_id: Option<&str>) -> AppResult<Vec<LeaderboardEntry>> {
        let scores = match quiz_id {
            Some(quiz_id) => {
                self.score_repository
                    .top_scores_by_quiz(quiz_id, LEADERBOARD_LIMIT)
                    .await?
            }
            None => self.score_repository.top_scores(LEADERBOARD_LIMIT).await?,
        };

        let usernames = self.resolve_usernames(&scores).await?;

        Ok(scores
            .into_iter()
            .map(|score| LeaderboardEntry {
                username: usernames
                    .get(&score.user_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                score: score.score,
                total: score.total,
                quiz_id: score.quiz_id,
                created_at: score.created_at,
            })
            .collect())
    }

    /// Every attempt, newest first, resolved against usernames and quiz
    /// titles.
    pub async fn score_history(&self) -> AppResult<Vec<ScoreHistoryEntry>> {
        let scores = self.score_repository.find_all_recent().await?;

        let usernames = self.resolve_usernames(&scores).await?;

        let mut quiz_ids: Vec<String> = scores.iter().map(|s| s.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();
        let titles: HashMap<String, String> = self
            .quiz_repository
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|quiz| (quiz.id, quiz.title))
            .collect();

        Ok(scores
            .into_iter()
            .map(|score| ScoreHistoryEntry {
                username: usernames
                    .get(&score.user_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                quiz_title: titles
                    .get(&score.quiz_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                score: score.score,
                total: score.total,
                date: score.created_at,
            })
            .collect())
    }

    async fn resolve_usernames(&self, scores: &[Score]) -> AppResult<HashMap<String, String>> {
        let mut user_ids: Vec<String> = scores.iter().map(|s| s.user_id.clone()).collect();
        user_ids.sort();
        user_ids.dedup();

        let users = self.user_repository.find_by_ids(&user_ids).await?;
        Ok(users
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{Question, QuestionType, Quiz, User},
        repositories::{
            quiz_repository::MockQuizRepository, score_repository::MockScoreRepository,
            user_repository::MockUserRepository,
        },
    };

    fn sample_quiz() -> Quiz {
        Quiz::new(
            "Sample",
            "",
            vec![
                Question {
                    question_text: "pick one".to_string(),
                    question_type: QuestionType::Single,
                    options: vec!["A".to_string(), "B".to_string()],
                    correct_answers: vec![1],
                },
                Question {
                    question_text: "pick some".to_string(),
                    question_type: QuestionType::Multiple,
                    options: vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
                    correct_answers: vec![0, 2],
                },
            ],
        )
    }

    #[actix_web::test]
    async fn test_submit_grades_and_appends_one_record() {
        let quiz = sample_quiz();
        let quiz_id = quiz.id.clone();

        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));

        let mut score_repo = MockScoreRepository::new();
        score_repo.expect_append().times(1).returning(|score| {
            assert_eq!(score.score, 2);
            assert_eq!(score.total, 2);
            Ok(score)
        });

        let service = ScoreService::new(
            Arc::new(score_repo),
            Arc::new(quiz_repo),
            Arc::new(MockUserRepository::new()),
        );

        let answers = vec![
            Answer::Single(1),
            Answer::Multiple([2, 0].into_iter().collect()),
        ];
        let response = service.submit(&quiz_id, "user-1", &answers).await.unwrap();

        assert_eq!(response.score, 2);
        assert_eq!(response.total, 2);
    }

    #[actix_web::test]
    async fn test_submit_unknown_quiz_is_not_found_and_records_nothing() {
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo.expect_find_by_id().returning(|_| Ok(None));

        let mut score_repo = MockScoreRepository::new();
        score_repo.expect_append().times(0);

        let service = ScoreService::new(
            Arc::new(score_repo),
            Arc::new(quiz_repo),
            Arc::new(MockUserRepository::new()),
        );

        let result = service.submit("missing", "user-1", &[]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_leaderboard_resolves_usernames() {
        let alice = User::test_user("alice");
        let bob = User::test_user("bob");
        let scores = vec![
            Score::new(&alice.id, "quiz-1", 5, 5),
            Score::new(&bob.id, "quiz-1", 3, 5),
        ];

        let mut score_repo = MockScoreRepository::new();
        score_repo
            .expect_top_scores()
            .returning(move |_| Ok(scores.clone()));

        let users = vec![alice.clone(), bob.clone()];
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_ids()
            .returning(move |_| Ok(users.clone()));

        let service = ScoreService::new(
            Arc::new(score_repo),
            Arc::new(MockQuizRepository::new()),
            Arc::new(user_repo),
        );

        let entries = service.leaderboard(None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].username, "alice");
        assert_eq!(entries[1].username, "bob");
    }

    #[actix_web::test]
    async fn test_leaderboard_filter_uses_quiz_scoped_query() {
        let mut score_repo = MockScoreRepository::new();
        score_repo
            .expect_top_scores_by_quiz()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        score_repo.expect_top_scores().times(0);

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_ids().returning(|_| Ok(vec![]));

        let service = ScoreService::new(
            Arc::new(score_repo),
            Arc::new(MockQuizRepository::new()),
            Arc::new(user_repo),
        );

        let entries = service.leaderboard(Some("quiz-1")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[actix_web::test]
    async fn test_score_history_joins_quiz_titles() {
        let user = User::test_user("alice");
        let quiz = sample_quiz();
        let scores = vec![Score::new(&user.id, &quiz.id, 1, 2)];

        let mut score_repo = MockScoreRepository::new();
        score_repo
            .expect_find_all_recent()
            .returning(move || Ok(scores.clone()));

        let users = vec![user.clone()];
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_ids()
            .returning(move |_| Ok(users.clone()));

        let quizzes = vec![quiz.clone()];
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo
            .expect_find_by_ids()
            .returning(move |_| Ok(quizzes.clone()));

        let service = ScoreService::new(
            Arc::new(score_repo),
            Arc::new(quiz_repo),
            Arc::new(user_repo),
        );

        let history = service.score_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].username, "alice");
        assert_eq!(history[0].quiz_title, "Sample");
    }
}
