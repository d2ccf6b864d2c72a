// region:    --- Imports
use super::queries;
use crate::database::DatabaseManager;
use crate::error::CoreError;
use crate::friends::model::{
    derive_relationship, merge_relationship, FriendEdge, Person, Relationship, User,
};
use crate::marketplace::model::{Bid, Item, SaleListing};
use crate::posts::model::Post;
use sqlx::Row;
use std::collections::HashMap;
use tracing::info;

// endregion: --- Imports

// region:    --- Marketplace Queries

/// 판매 중 목록 조회
pub async fn get_active_sales(db_manager: &DatabaseManager) -> Result<Vec<SaleListing>, CoreError> {
    info!("{:<12} --> 판매 중 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let listings = sqlx::query_as::<_, SaleListing>(queries::GET_ACTIVE_SALES)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(listings)
            })
        })
        .await
}

/// 판매 입찰 목록 조회
/// 가격 내림차순, 동률은 최신순. 판매자가 어느 입찰을 수락할지 결정하는
/// 순서이므로 정확하고 안정적이어야 한다.
pub async fn get_sale_bids(
    db_manager: &DatabaseManager,
    sale_id: i64,
) -> Result<Vec<Bid>, CoreError> {
    info!("{:<12} --> 판매 입찰 목록 조회 id: {}", "Query", sale_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let bids = sqlx::query_as::<_, Bid>(queries::GET_SALE_BIDS)
                    .bind(sale_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(bids)
            })
        })
        .await
}

/// 상품 조회
pub async fn get_item(db_manager: &DatabaseManager, item_id: i64) -> Result<Item, CoreError> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(CoreError::NotFound)
            })
        })
        .await
}

// endregion: --- Marketplace Queries

// region:    --- Post Queries

/// 사용자 게시글 조회
pub async fn get_user_posts(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Post>, CoreError> {
    info!("{:<12} --> 사용자 게시글 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let posts = sqlx::query_as::<_, Post>(queries::GET_USER_POSTS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(posts)
            })
        })
        .await
}

// endregion: --- Post Queries

// region:    --- Relationship Queries

/// 사용자 조회
pub async fn get_user(db_manager: &DatabaseManager, user_id: i64) -> Result<User, CoreError> {
    info!("{:<12} --> 사용자 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(queries::GET_USER)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(CoreError::NotFound)
            })
        })
        .await
}

/// 두 사용자 사이의 파생 관계 조회
pub async fn get_relationship(
    db_manager: &DatabaseManager,
    viewer: i64,
    other: i64,
) -> Result<Relationship, CoreError> {
    info!(
        "{:<12} --> 관계 조회: {} vs {}",
        "Query", viewer, other
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let edge = sqlx::query_as::<_, FriendEdge>(queries::GET_PAIR_EDGE)
                    .bind(viewer)
                    .bind(other)
                    .fetch_optional(&mut **tx)
                    .await?;
                Ok(derive_relationship(viewer, edge.as_ref()))
            })
        })
        .await
}

/// 사람 목록 조회
/// 본인을 제외한 모든 사용자에 보는 사람 기준 파생 관계를 붙여 돌려준다.
/// 파생은 행이 아니라 쌍 단위로 계산한다. 같은 쌍에 행이 여럿 걸리면
/// none이 아닌 결과가 이긴다.
pub async fn get_people(
    db_manager: &DatabaseManager,
    viewer: i64,
) -> Result<Vec<Person>, CoreError> {
    info!("{:<12} --> 사람 목록 조회 viewer: {}", "Query", viewer);
    let rows = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let rows = sqlx::query(queries::GET_PEOPLE)
                    .bind(viewer)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok::<_, CoreError>(rows)
            })
        })
        .await?;

    let mut people: Vec<Person> = Vec::with_capacity(rows.len());
    let mut seen: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let user = User {
            id: row.try_get("id")?,
            first: row.try_get("first")?,
            last: row.try_get("last")?,
            about: row.try_get("about")?,
            interests: row.try_get("interests")?,
            image_ref: row.try_get("image_ref")?,
            online: row.try_get("online")?,
        };

        let edge = match row.try_get::<Option<i64>, _>("edge_id")? {
            Some(edge_id) => Some(FriendEdge {
                id: edge_id,
                user_id: row.try_get("edge_user_id")?,
                friend_id: row.try_get("edge_friend_id")?,
                status: row.try_get("edge_status")?,
            }),
            None => None,
        };
        let relationship = derive_relationship(viewer, edge.as_ref());

        match seen.get(&user.id) {
            Some(&idx) => {
                people[idx].relationship =
                    merge_relationship(people[idx].relationship, relationship);
            }
            None => {
                seen.insert(user.id, people.len());
                people.push(Person { user, relationship });
            }
        }
    }
    Ok(people)
}

/// 친구 목록 조회 (수락된 관계, 어느 쪽에서 시작했는지 무관)
pub async fn get_friends(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<User>, CoreError> {
    info!("{:<12} --> 친구 목록 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let friends = sqlx::query_as::<_, User>(queries::GET_FRIENDS)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(friends)
            })
        })
        .await
}

// endregion: --- Relationship Queries
