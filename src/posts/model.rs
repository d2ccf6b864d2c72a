use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 게시글 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
