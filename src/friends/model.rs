/// 친구 관계 모델
/// 저장은 방향이 있는 엣지 하나(요청자 -> 수신자)로 하고, 조회는 어느 쪽에서
/// 보더라도 대칭적인 파생 상태로 답한다.
// region:    --- Imports
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Friend Edge

/// 엣지 상태
pub const EDGE_PENDING: &str = "pending";
pub const EDGE_ACCEPTED: &str = "accepted";

/// 친구 엣지 (user_id가 요청자)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct FriendEdge {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: String,
}

// endregion: --- Friend Edge

// region:    --- Derived Relationship

/// 보는 사람 기준의 파생 관계 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    None,
    PendingOut,
    PendingIn,
    Friends,
}

/// 한 쌍에 대한 파생 관계 계산
/// 모든 조회 경로가 이 함수 하나를 공유한다.
pub fn derive_relationship(viewer: i64, edge: Option<&FriendEdge>) -> Relationship {
    match edge {
        None => Relationship::None,
        Some(e) if e.status == EDGE_ACCEPTED => Relationship::Friends,
        Some(e) if e.user_id == viewer => Relationship::PendingOut,
        Some(_) => Relationship::PendingIn,
    }
}

/// 쌍 단위 병합: 여러 행이 같은 쌍에 걸리는 경우 None이 아닌 결과가 이긴다
pub fn merge_relationship(current: Relationship, next: Relationship) -> Relationship {
    if current == Relationship::None {
        next
    } else {
        current
    }
}

// endregion: --- Derived Relationship

// region:    --- People View

/// 사용자 모델 (코어는 읽기만 한다)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first: String,
    pub last: String,
    pub about: Option<String>,
    pub interests: Option<String>,
    pub image_ref: Option<String>,
    pub online: i64,
}

/// 사람 목록 항목 (사용자 + 보는 사람 기준 파생 관계)
#[derive(Debug, Serialize)]
pub struct Person {
    #[serde(flatten)]
    pub user: User,
    pub relationship: Relationship,
}

// endregion: --- People View

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(user_id: i64, friend_id: i64, status: &str) -> FriendEdge {
        FriendEdge {
            id: 1,
            user_id,
            friend_id,
            status: status.to_string(),
        }
    }

    /// 엣지가 없으면 양쪽 모두 none
    #[test]
    fn test_derive_no_edge() {
        assert_eq!(derive_relationship(1, None), Relationship::None);
        assert_eq!(derive_relationship(2, None), Relationship::None);
    }

    /// 대기 중인 엣지는 요청자에게 pending_out, 수신자에게 pending_in
    #[test]
    fn test_derive_pending_is_complementary() {
        let e = edge(1, 2, EDGE_PENDING);
        assert_eq!(derive_relationship(1, Some(&e)), Relationship::PendingOut);
        assert_eq!(derive_relationship(2, Some(&e)), Relationship::PendingIn);
    }

    /// 수락된 엣지는 방향과 무관하게 양쪽 모두 friends
    #[test]
    fn test_derive_accepted_is_symmetric() {
        let e = edge(1, 2, EDGE_ACCEPTED);
        assert_eq!(derive_relationship(1, Some(&e)), Relationship::Friends);
        assert_eq!(derive_relationship(2, Some(&e)), Relationship::Friends);
        let reversed = edge(2, 1, EDGE_ACCEPTED);
        assert_eq!(derive_relationship(1, Some(&reversed)), Relationship::Friends);
    }

    /// 쌍 단위 병합은 none이 아닌 결과를 유지한다
    #[test]
    fn test_merge_non_none_wins() {
        assert_eq!(
            merge_relationship(Relationship::None, Relationship::Friends),
            Relationship::Friends
        );
        assert_eq!(
            merge_relationship(Relationship::PendingOut, Relationship::None),
            Relationship::PendingOut
        );
        assert_eq!(
            merge_relationship(Relationship::None, Relationship::None),
            Relationship::None
        );
    }
}

// endregion: --- Tests
