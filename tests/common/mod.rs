use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quizdeck_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Quiz, Score, User},
    repositories::{QuizRepository, ScoreRepository, UserRepository},
};

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quizdeck-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
        jwt_expiration_hours: 1,
    }
}

/// The application state wired over in-memory stores, plus direct handles
/// to those stores so tests can seed data behind the API's back.
pub struct TestContext {
    pub state: AppState,
    pub user_repo: Arc<InMemoryUserRepository>,
    pub quiz_repo: Arc<InMemoryQuizRepository>,
    pub score_repo: Arc<InMemoryScoreRepository>,
}

pub fn test_context() -> TestContext {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let quiz_repo = Arc::new(InMemoryQuizRepository::new());
    let score_repo = Arc::new(InMemoryScoreRepository::new());

    let state = AppState::with_repositories(
        test_config(),
        Arc::clone(&user_repo) as Arc<dyn UserRepository>,
        Arc::clone(&quiz_repo) as Arc<dyn QuizRepository>,
        Arc::clone(&score_repo) as Arc<dyn ScoreRepository>,
    );

    TestContext {
        state,
        user_repo,
        quiz_repo,
        score_repo,
    }
}

impl TestContext {
    /// Seed a user directly into the store and return it with a fresh
    /// token, bypassing the registration endpoint.
    pub async fn seed_user(&self, username: &str, is_admin: bool) -> (User, String) {
        let mut user = User::new(username, "$argon2id$seeded-test-hash");
        user.is_admin = is_admin;

        let user = self
            .user_repo
            .create(user)
            .await
            .expect("seeding a user should succeed");
        let token = self
            .state
            .jwt_service
            .create_token(&user)
            .expect("token creation should succeed");

        (user, token)
    }
}

pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on username.
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| quizzes.get(id).cloned())
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.remove(id).is_none() {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}

pub struct InMemoryScoreRepository {
    scores: RwLock<Vec<Score>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self {
            scores: RwLock::new(Vec::new()),
        }
    }

    fn ranked(mut scores: Vec<Score>, limit: i64) -> Vec<Score> {
        scores.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.created_at.cmp(&b.created_at))
        });
        scores.truncate(limit.max(0) as usize);
        scores
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn append(&self, score: Score) -> AppResult<Score> {
        let mut scores = self.scores.write().await;
        scores.push(score.clone());
        Ok(score)
    }

    async fn top_scores(&self, limit: i64) -> AppResult<Vec<Score>> {
        let scores = self.scores.read().await;
        Ok(Self::ranked(scores.clone(), limit))
    }

    async fn top_scores_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<Score>> {
        let scores = self.scores.read().await;
        let filtered: Vec<Score> = scores
            .iter()
            .filter(|s| s.quiz_id == quiz_id)
            .cloned()
            .collect();
        Ok(Self::ranked(filtered, limit))
    }

    async fn find_all_recent(&self) -> AppResult<Vec<Score>> {
        let scores = self.scores.read().await;
        let mut items = scores.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let mut scores = self.scores.write().await;
        let before = scores.len();
        scores.retain(|s| s.quiz_id != quiz_id);
        Ok((before - scores.len()) as u64)
    }
}
