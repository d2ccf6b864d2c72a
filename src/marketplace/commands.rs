/// 마켓플레이스 커맨드 처리
/// 1. 상품 등록
/// 2. 판매 생성
/// 3. 입찰 (신규 또는 갱신)
/// 4. 낙찰 (소유권 이전)
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{is_unique_violation, CoreError};
use crate::marketplace::model::{Bid, Item, Sale, SALE_ACTIVE};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 상품 등록 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListItemCommand {
    pub name: String,
    pub image_ref: Option<String>,
}

/// 판매 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateSaleCommand {
    pub item_id: i64,
    pub floor_price: i64,
}

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub sale_id: i64,
    pub bid_price: i64,
}

/// 낙찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AcceptBidCommand {
    pub bid_id: i64,
}

/// 1. 상품 등록
/// 이미지 참조 문자열은 업로드 계층이 넘겨준 값을 그대로 저장한다.
pub async fn handle_list_item(
    caller: i64,
    cmd: ListItemCommand,
    db_manager: &DatabaseManager,
) -> Result<Item, CoreError> {
    info!("{:<12} --> 상품 등록 처리 시작: {:?}", "Command", cmd);
    if cmd.name.trim().is_empty() {
        return Err(CoreError::InvalidInput("name"));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let item = sqlx::query_as::<_, Item>(
                    "INSERT INTO items (owner_id, name, image_ref)
                     VALUES ($1, $2, $3)
                     RETURNING id, owner_id, name, image_ref, created_at",
                )
                .bind(caller)
                .bind(cmd.name.trim())
                .bind(&cmd.image_ref)
                .fetch_one(&mut **tx)
                .await?;
                Ok(item)
            })
        })
        .await
}

/// 2. 판매 생성
/// 상품 행을 잠근 상태에서 소유권과 판매 중 여부를 검사하고 판매를 생성한다.
/// 같은 상품에 대한 동시 판매 생성은 행 잠금과 부분 고유 인덱스
/// (sales_one_active_per_item)에 의해 하나만 성공한다.
pub async fn handle_create_sale(
    caller: i64,
    cmd: CreateSaleCommand,
    db_manager: &DatabaseManager,
) -> Result<Sale, CoreError> {
    info!("{:<12} --> 판매 생성 처리 시작: {:?}", "Command", cmd);
    if cmd.floor_price <= 0 {
        return Err(CoreError::InvalidPrice);
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 상품 행 잠금 및 소유권 확인
                let owner_id: i64 =
                    sqlx::query_scalar("SELECT owner_id FROM items WHERE id = $1 FOR UPDATE")
                        .bind(cmd.item_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or(CoreError::NotFound)?;
                if owner_id != caller {
                    return Err(CoreError::NotOwner);
                }

                // 판매 중인 상품인지 확인
                let already_listed: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM sales WHERE item_id = $1 AND status = 'active')",
                )
                .bind(cmd.item_id)
                .fetch_one(&mut **tx)
                .await?;
                if already_listed {
                    return Err(CoreError::AlreadyListed);
                }

                let sale = sqlx::query_as::<_, Sale>(
                    "INSERT INTO sales (item_id, seller_id, floor_price)
                     VALUES ($1, $2, $3)
                     RETURNING id, item_id, seller_id, floor_price, status, created_at",
                )
                .bind(cmd.item_id)
                .bind(caller)
                .bind(cmd.floor_price)
                .fetch_one(&mut **tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        CoreError::AlreadyListed
                    } else {
                        CoreError::from(e)
                    }
                })?;
                Ok(sale)
            })
        })
        .await
}

/// 3. 입찰 (신규 또는 갱신)
/// 판매 행을 공유 잠금으로 잡아 낙찰과는 배타적으로, 다른 입찰자와는 동시에
/// 진행한다. 입찰자별 단일 행 갱신은 단일 upsert 문으로 처리해
/// (sale_id, bidder_id) 키에 대해 직렬화된다. 조건에 걸려 행이 돌아오지
/// 않으면 본인의 이전 입찰보다 높지 않은 것이다.
pub async fn handle_place_bid(
    caller: i64,
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Bid, CoreError> {
    info!("{:<12} --> 입찰 처리 시작: {:?}", "Command", cmd);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let sale = sqlx::query_as::<_, Sale>(
                    "SELECT id, item_id, seller_id, floor_price, status, created_at
                     FROM sales WHERE id = $1 FOR SHARE",
                )
                .bind(cmd.sale_id)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(CoreError::SaleNotActive)?;

                if sale.status != SALE_ACTIVE {
                    return Err(CoreError::SaleNotActive);
                }
                if sale.seller_id == caller {
                    return Err(CoreError::SelfBid);
                }
                if cmd.bid_price <= sale.floor_price {
                    return Err(CoreError::PriceTooLow);
                }

                let bid = sqlx::query_as::<_, Bid>(
                    "INSERT INTO bids (sale_id, bidder_id, bid_price)
                     VALUES ($1, $2, $3)
                     ON CONFLICT (sale_id, bidder_id)
                     DO UPDATE SET bid_price = EXCLUDED.bid_price, created_at = now()
                     WHERE bids.bid_price < EXCLUDED.bid_price
                     RETURNING id, sale_id, bidder_id, bid_price, created_at",
                )
                .bind(cmd.sale_id)
                .bind(caller)
                .bind(cmd.bid_price)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(CoreError::PriceNotIncreasing)?;
                Ok(bid)
            })
        })
        .await
}

/// 4. 낙찰
/// 판매 행을 배타 잠금으로 잡고 소유권 이전과 판매 종료를 한 트랜잭션으로
/// 수행한다. 둘 다 반영되거나 둘 다 반영되지 않는다. 남은 입찰 행은 건드리지
/// 않는다. 판매가 active가 아니므로 이후의 입찰과 낙찰은 모두 거부된다.
pub async fn handle_accept_bid(
    caller: i64,
    cmd: AcceptBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Sale, CoreError> {
    info!("{:<12} --> 낙찰 처리 시작: {:?}", "Command", cmd);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let row = sqlx::query(
                    "SELECT b.bidder_id, s.id AS sale_id, s.item_id, s.seller_id, s.status
                     FROM bids b
                     JOIN sales s ON s.id = b.sale_id
                     WHERE b.id = $1
                     FOR UPDATE OF s",
                )
                .bind(cmd.bid_id)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or(CoreError::NotFound)?;

                let bidder_id: i64 = row.get("bidder_id");
                let sale_id: i64 = row.get("sale_id");
                let item_id: i64 = row.get("item_id");
                let seller_id: i64 = row.get("seller_id");
                let status: String = row.get("status");

                if status != SALE_ACTIVE {
                    return Err(CoreError::SaleNotActive);
                }
                if seller_id != caller {
                    return Err(CoreError::NotSeller);
                }

                // 소유권 이전
                sqlx::query("UPDATE items SET owner_id = $1 WHERE id = $2")
                    .bind(bidder_id)
                    .bind(item_id)
                    .execute(&mut **tx)
                    .await?;

                // 판매 종료
                let sale = sqlx::query_as::<_, Sale>(
                    "UPDATE sales SET status = 'sold' WHERE id = $1
                     RETURNING id, item_id, seller_id, floor_price, status, created_at",
                )
                .bind(sale_id)
                .fetch_one(&mut **tx)
                .await?;

                info!(
                    "{:<12} --> 낙찰 완료: 상품 {} 소유자 {}",
                    "Command", item_id, bidder_id
                );
                Ok(sale)
            })
        })
        .await
}

// endregion: --- Commands
