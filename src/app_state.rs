use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoScoreRepository, MongoUserRepository, QuizRepository,
        ScoreRepository, UserRepository,
    },
    services::{AuthService, QuizService, ScoreService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub quiz_service: Arc<QuizService>,
    pub score_service: Arc<ScoreService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let score_repository = Arc::new(MongoScoreRepository::new(&db));
        score_repository.ensure_indexes().await?;

        Ok(Self::with_repositories(
            config,
            user_repository,
            quiz_repository,
            score_repository,
        ))
    }

    /// Wire the service stack over any repository implementations. Used by
    /// `new` for MongoDB and by tests for in-memory stores.
    pub fn with_repositories(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            jwt_service.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            Arc::clone(&quiz_repository),
            Arc::clone(&score_repository),
        ));
        let score_service = Arc::new(ScoreService::new(
            score_repository,
            quiz_repository,
            user_repository,
        ));

        Self {
            auth_service,
            quiz_service,
            score_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
