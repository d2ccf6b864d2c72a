/// 게시글 커맨드 처리
/// 1. 게시글 작성
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::CoreError;
use crate::posts::model::Post;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 게시글 작성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePostCommand {
    pub content: String,
}

/// 1. 게시글 작성
pub async fn handle_create_post(
    caller: i64,
    cmd: CreatePostCommand,
    db_manager: &DatabaseManager,
) -> Result<Post, CoreError> {
    info!("{:<12} --> 게시글 작성 처리 시작: {:?}", "Command", cmd);
    if cmd.content.trim().is_empty() {
        return Err(CoreError::InvalidInput("content"));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let post = sqlx::query_as::<_, Post>(
                    "INSERT INTO posts (user_id, content)
                     VALUES ($1, $2)
                     RETURNING id, user_id, content, created_at",
                )
                .bind(caller)
                .bind(cmd.content.trim())
                .fetch_one(&mut **tx)
                .await?;
                Ok(post)
            })
        })
        .await
}

// endregion: --- Commands
