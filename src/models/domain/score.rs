use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One persisted attempt record. Insert-only; removed only when the quiz it
/// references is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: i32,
    pub total: i32,
    pub created_at: DateTime<Utc>,
}

impl Score {
    pub fn new(user_id: &str, quiz_id: &str, score: i32, total: i32) -> Self {
        Score {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total,
            created_at: Utc::now(),
        }
    }
}

/// One submitted answer, aligned by position with the quiz's questions.
///
/// The wire shape is whatever the client sent for that slot: a bare index,
/// an array of indices, or null. Anything that does not parse as one of
/// those grades as unanswered instead of failing the submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Unanswered,
    Single(usize),
    Multiple(BTreeSet<usize>),
}

impl Answer {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Answer::Unanswered,
            Value::Number(n) => match n.as_u64() {
                Some(index) => Answer::Single(index as usize),
                None => Answer::Unanswered,
            },
            Value::Array(items) => {
                let mut indices = BTreeSet::new();
                for item in items {
                    match item.as_u64() {
                        Some(index) => {
                            indices.insert(index as usize);
                        }
                        None => return Answer::Unanswered,
                    }
                }
                Answer::Multiple(indices)
            }
            _ => Answer::Unanswered,
        }
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Answer::from_value(value))
    }
}

impl Serialize for Answer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Answer::Unanswered => serializer.serialize_none(),
            Answer::Single(index) => serializer.serialize_u64(*index as u64),
            Answer::Multiple(indices) => indices.serialize(serializer),
        }
    }
}
