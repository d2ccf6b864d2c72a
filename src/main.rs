// region:    --- Imports
use axum::routing::{get, post};
use axum::Router;
use marketplace_service::database::DatabaseManager;
use marketplace_service::handlers;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 정적 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        // 마켓플레이스
        .route("/items", post(handlers::handle_list_item))
        .route("/items/:id", get(handlers::handle_get_item))
        .route(
            "/sales",
            post(handlers::handle_create_sale).get(handlers::handle_get_active_sales),
        )
        .route("/sales/:id/bids", get(handlers::handle_get_sale_bids))
        .route("/bid", post(handlers::handle_bid))
        .route("/accept-bid", post(handlers::handle_accept_bid))
        // 게시글
        .route("/post", post(handlers::handle_create_post))
        .route("/posts/:id", get(handlers::handle_get_posts))
        // 친구 관계
        .route("/add-friend", post(handlers::handle_add_friend))
        .route("/accept-friend", post(handlers::handle_accept_friend))
        .route("/decline-friend", post(handlers::handle_decline_friend))
        .route("/remove-friend", post(handlers::handle_remove_friend))
        .route("/relationship/:id", get(handlers::handle_get_relationship))
        .route("/people", get(handlers::handle_get_people))
        .route("/user/:id", get(handlers::handle_get_user))
        .route("/friends/:id", get(handlers::handle_get_friends))
        .layer(cors)
        .with_state(db_manager);

    // 리스너 생성
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
