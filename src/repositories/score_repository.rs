use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{db::Database, errors::AppResult, models::domain::Score};

/// Insert-only ledger of quiz attempts. The only deletion path is the
/// cascade when the referenced quiz is removed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn append(&self, score: Score) -> AppResult<Score>;
    /// Top records by score descending; ties break by `created_at`
    /// ascending so ranking is deterministic.
    async fn top_scores(&self, limit: i64) -> AppResult<Vec<Score>>;
    /// Same ordering, restricted to one quiz.
    async fn top_scores_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<Score>>;
    /// Every record, newest first.
    async fn find_all_recent(&self) -> AppResult<Vec<Score>>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoScoreRepository {
    collection: Collection<Score>,
}

impl MongoScoreRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("scores");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        let ranking_index = IndexModel::builder()
            .keys(doc! { "score": -1, "created_at": 1 })
            .options(IndexOptions::builder().name("ranking".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_id_index).await?;
        self.collection.create_index(ranking_index).await?;

        log::info!("Created indexes for scores collection");
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for MongoScoreRepository {
    async fn append(&self, score: Score) -> AppResult<Score> {
        self.collection.insert_one(&score).await?;
        Ok(score)
    }

    async fn top_scores(&self, limit: i64) -> AppResult<Vec<Score>> {
        let scores = self
            .collection
            .find(doc! {})
            .sort(doc! { "score": -1, "created_at": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn top_scores_by_quiz(&self, quiz_id: &str, limit: i64) -> AppResult<Vec<Score>> {
        let scores = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "score": -1, "created_at": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn find_all_recent(&self) -> AppResult<Vec<Score>> {
        let scores = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }
}
