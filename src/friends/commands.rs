/// 친구 관계 커맨드 처리
/// 1. 친구 요청
/// 2. 요청 수락
/// 3. 요청 거절
/// 4. 친구 삭제
///
/// 같은 쌍에 대한 작업은 쌍 엣지 행 잠금과 고유 인덱스
/// (friends_one_edge_per_pair)로 서로 직렬화되고, 다른 쌍과는 독립이다.
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{is_unique_violation, CoreError};
use crate::friends::model::{FriendEdge, EDGE_ACCEPTED};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 친구 요청/수락/거절/삭제 명령 (friend_id는 상대방)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FriendCommand {
    pub friend_id: i64,
}

/// 1. 친구 요청
/// 쌍에 대한 기존 엣지를 잠근 뒤 방향과 상태에 따라 분기한다.
pub async fn handle_request(
    caller: i64,
    cmd: FriendCommand,
    db_manager: &DatabaseManager,
) -> Result<FriendEdge, CoreError> {
    info!(
        "{:<12} --> 친구 요청 처리 시작: {} -> {}",
        "Command", caller, cmd.friend_id
    );
    if caller == cmd.friend_id {
        return Err(CoreError::SelfRequest);
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let existing = sqlx::query_as::<_, FriendEdge>(
                    "SELECT id, user_id, friend_id, status FROM friends
                     WHERE (user_id = $1 AND friend_id = $2)
                        OR (user_id = $2 AND friend_id = $1)
                     FOR UPDATE",
                )
                .bind(caller)
                .bind(cmd.friend_id)
                .fetch_optional(&mut **tx)
                .await?;

                match existing {
                    Some(e) if e.status == EDGE_ACCEPTED => Err(CoreError::AlreadyFriends),
                    Some(e) if e.user_id == caller => Err(CoreError::RequestAlreadySent),
                    Some(_) => Err(CoreError::PendingFromOther),
                    None => {
                        let edge = sqlx::query_as::<_, FriendEdge>(
                            "INSERT INTO friends (user_id, friend_id, status)
                             VALUES ($1, $2, 'pending')
                             RETURNING id, user_id, friend_id, status",
                        )
                        .bind(caller)
                        .bind(cmd.friend_id)
                        .fetch_one(&mut **tx)
                        .await
                        .map_err(|e| {
                            if is_unique_violation(&e) {
                                CoreError::RequestAlreadySent
                            } else {
                                CoreError::from(e)
                            }
                        })?;
                        Ok(edge)
                    }
                }
            })
        })
        .await
}

/// 2. 요청 수락 (friend_id가 요청자)
/// 갱신 후 정리: 대기 엣지를 accepted로 바꾸고, 같은 쌍의 다른 행이 있었다면
/// 지워서 쌍마다 정확히 하나의 엣지만 남긴다.
pub async fn handle_accept(
    caller: i64,
    cmd: FriendCommand,
    db_manager: &DatabaseManager,
) -> Result<FriendEdge, CoreError> {
    info!(
        "{:<12} --> 친구 요청 수락 처리 시작: {} <- {}",
        "Command", caller, cmd.friend_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let edge = sqlx::query_as::<_, FriendEdge>(
                    "UPDATE friends SET status = 'accepted'
                     WHERE user_id = $1 AND friend_id = $2 AND status = 'pending'
                     RETURNING id, user_id, friend_id, status",
                )
                .bind(cmd.friend_id)
                .bind(caller)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(CoreError::NoSuchRequest)?;

                // 정리: 같은 쌍의 다른 행 제거
                sqlx::query(
                    "DELETE FROM friends
                     WHERE user_id = $1 AND friend_id = $2 AND id != $3",
                )
                .bind(caller)
                .bind(cmd.friend_id)
                .bind(edge.id)
                .execute(&mut **tx)
                .await?;

                Ok(edge)
            })
        })
        .await
}

/// 3. 요청 거절 (friend_id가 요청자)
/// 거절은 삭제다. 터미널 "거절됨" 상태는 없다.
/// 없는 요청에 대한 거절은 다른 거부 경로와 마찬가지로 실패로 처리한다.
pub async fn handle_decline(
    caller: i64,
    cmd: FriendCommand,
    db_manager: &DatabaseManager,
) -> Result<(), CoreError> {
    info!(
        "{:<12} --> 친구 요청 거절 처리 시작: {} <- {}",
        "Command", caller, cmd.friend_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    "DELETE FROM friends
                     WHERE user_id = $1 AND friend_id = $2 AND status = 'pending'",
                )
                .bind(cmd.friend_id)
                .bind(caller)
                .execute(&mut **tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(CoreError::NoSuchRequest);
                }
                Ok(())
            })
        })
        .await
}

/// 4. 친구 삭제
/// 쌍 사이의 엣지를 방향과 상태에 관계없이 삭제한다. 엣지가 없어도 성공한다.
pub async fn handle_remove(
    caller: i64,
    cmd: FriendCommand,
    db_manager: &DatabaseManager,
) -> Result<(), CoreError> {
    info!(
        "{:<12} --> 친구 삭제 처리 시작: {} <-> {}",
        "Command", caller, cmd.friend_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "DELETE FROM friends
                     WHERE (user_id = $1 AND friend_id = $2)
                        OR (user_id = $2 AND friend_id = $1)",
                )
                .bind(caller)
                .bind(cmd.friend_id)
                .execute(&mut **tx)
                .await?;
                Ok(())
            })
        })
        .await
}

// endregion: --- Commands
