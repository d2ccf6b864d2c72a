// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::CoreError;
use crate::friends::commands::{
    handle_accept as command_accept_friend, handle_decline as command_decline_friend,
    handle_remove as command_remove_friend, handle_request as command_request_friend,
    FriendCommand,
};
use crate::marketplace::commands::{
    handle_accept_bid as command_accept_bid, handle_create_sale as command_create_sale,
    handle_list_item as command_list_item, handle_place_bid as command_place_bid,
    AcceptBidCommand, CreateSaleCommand, ListItemCommand, PlaceBidCommand,
};
use crate::posts::commands::{handle_create_post as command_create_post, CreatePostCommand};
use crate::query;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Caller Identity

/// 인증된 호출자
/// 세션/인증 계층은 외부 협력자다. 게이트웨이가 주입한 x-user-id 헤더로
/// 호출자 id를 받고, 없으면 인증 실패로 처리한다.
pub struct Caller(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .map(Caller)
            .ok_or(CoreError::Unauthenticated)
    }
}

// endregion: --- Caller Identity

// region:    --- Command Handlers

/// 상품 등록 요청 처리
pub async fn handle_list_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<ListItemCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 상품 등록 요청: {:?}", "Handler", cmd);
    let item = command_list_item(caller.0, cmd, &db_manager).await?;
    Ok(Json(item))
}

/// 판매 생성 요청 처리
pub async fn handle_create_sale(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<CreateSaleCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 판매 생성 요청: {:?}", "Handler", cmd);
    let sale = command_create_sale(caller.0, cmd, &db_manager).await?;
    Ok(Json(sale))
}

/// 입찰 요청 처리
pub async fn handle_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 입찰 요청: {:?}", "Handler", cmd);
    let bid = command_place_bid(caller.0, cmd, &db_manager).await?;
    Ok(Json(bid))
}

/// 낙찰 요청 처리
pub async fn handle_accept_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<AcceptBidCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 낙찰 요청: {:?}", "Handler", cmd);
    let sale = command_accept_bid(caller.0, cmd, &db_manager).await?;
    Ok(Json(sale))
}

/// 게시글 작성 요청 처리
pub async fn handle_create_post(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<CreatePostCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 게시글 작성 요청: {:?}", "Handler", cmd);
    let post = command_create_post(caller.0, cmd, &db_manager).await?;
    Ok(Json(post))
}

/// 친구 요청 처리
pub async fn handle_add_friend(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<FriendCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 친구 요청: {:?}", "Handler", cmd);
    let edge = command_request_friend(caller.0, cmd, &db_manager).await?;
    Ok(Json(edge))
}

/// 친구 요청 수락 처리
pub async fn handle_accept_friend(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<FriendCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 친구 요청 수락: {:?}", "Handler", cmd);
    let edge = command_accept_friend(caller.0, cmd, &db_manager).await?;
    Ok(Json(edge))
}

/// 친구 요청 거절 처리
pub async fn handle_decline_friend(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<FriendCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 친구 요청 거절: {:?}", "Handler", cmd);
    command_decline_friend(caller.0, cmd, &db_manager).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// 친구 삭제 처리
pub async fn handle_remove_friend(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Json(cmd): Json<FriendCommand>,
) -> Result<impl IntoResponse, CoreError> {
    info!("{:<12} --> 친구 삭제: {:?}", "Handler", cmd);
    command_remove_friend(caller.0, cmd, &db_manager).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 판매 중 목록 조회
pub async fn handle_get_active_sales(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> Result<impl IntoResponse, CoreError> {
    let listings = query::handlers::get_active_sales(&db_manager).await?;
    Ok(Json(listings))
}

/// 판매 입찰 목록 조회
pub async fn handle_get_sale_bids(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(sale_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let bids = query::handlers::get_sale_bids(&db_manager, sale_id).await?;
    Ok(Json(bids))
}

/// 상품 조회
pub async fn handle_get_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let item = query::handlers::get_item(&db_manager, item_id).await?;
    Ok(Json(item))
}

/// 사용자 조회
pub async fn handle_get_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let user = query::handlers::get_user(&db_manager, user_id).await?;
    Ok(Json(user))
}

/// 사용자 게시글 조회
pub async fn handle_get_posts(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let posts = query::handlers::get_user_posts(&db_manager, user_id).await?;
    Ok(Json(posts))
}

/// 호출자와 다른 사용자 사이의 관계 조회
pub async fn handle_get_relationship(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
    Path(other_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let relationship = query::handlers::get_relationship(&db_manager, caller.0, other_id).await?;
    Ok(Json(serde_json::json!({ "relationship": relationship })))
}

/// 사람 목록 조회
pub async fn handle_get_people(
    State(db_manager): State<Arc<DatabaseManager>>,
    caller: Caller,
) -> Result<impl IntoResponse, CoreError> {
    let people = query::handlers::get_people(&db_manager, caller.0).await?;
    Ok(Json(people))
}

/// 친구 목록 조회
pub async fn handle_get_friends(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, CoreError> {
    let friends = query::handlers::get_friends(&db_manager, user_id).await?;
    Ok(Json(friends))
}

// endregion: --- Query Handlers
