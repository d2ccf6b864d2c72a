use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 판매 상태
pub const SALE_ACTIVE: &str = "active";
pub const SALE_SOLD: &str = "sold";

// 상품 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 판매 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub item_id: i64,
    pub seller_id: i64,
    pub floor_price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// 입찰 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub sale_id: i64,
    pub bidder_id: i64,
    pub bid_price: i64,
    pub created_at: DateTime<Utc>,
}

/// 판매 목록 항목 (판매 + 상품 요약)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleListing {
    pub id: i64,
    pub item_id: i64,
    pub seller_id: i64,
    pub floor_price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub item_name: String,
    pub item_image_ref: Option<String>,
}
