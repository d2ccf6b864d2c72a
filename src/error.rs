/// 코어 실패 분류
/// 모든 커맨드/쿼리는 성공 페이로드 또는 타입화된 실패를 반환한다.
// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

// endregion: --- Imports

// region:    --- Core Error

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    // 입력 오류
    #[error("필수 필드가 없거나 잘못되었습니다: {0}")]
    InvalidInput(&'static str),
    #[error("판매 시작 가격은 0보다 커야 합니다")]
    InvalidPrice,

    // 인증/권한 오류
    #[error("로그인이 필요합니다")]
    Unauthenticated,
    #[error("상품의 소유자가 아닙니다")]
    NotOwner,
    #[error("판매의 판매자가 아닙니다")]
    NotSeller,

    // 조회 오류
    #[error("대상을 찾을 수 없습니다")]
    NotFound,
    #[error("해당 친구 요청이 없습니다")]
    NoSuchRequest,

    // 불변식 충돌
    #[error("이미 판매 중인 상품입니다")]
    AlreadyListed,
    #[error("종료되었거나 존재하지 않는 판매입니다")]
    SaleNotActive,
    #[error("자신의 판매에는 입찰할 수 없습니다")]
    SelfBid,
    #[error("입찰 가격은 판매 시작 가격보다 높아야 합니다")]
    PriceTooLow,
    #[error("입찰 가격은 본인의 이전 입찰 가격보다 높아야 합니다")]
    PriceNotIncreasing,
    #[error("자신에게 친구 요청을 보낼 수 없습니다")]
    SelfRequest,
    #[error("이미 친구입니다")]
    AlreadyFriends,
    #[error("이미 친구 요청을 보냈습니다")]
    RequestAlreadySent,
    #[error("상대방이 이미 친구 요청을 보냈습니다. 수락해 주세요")]
    PendingFromOther,

    // 저장소 오류 (세부 내용은 로그에만 남긴다)
    #[error("저장소 오류가 발생했습니다")]
    Store(#[from] sqlx::Error),
}

impl CoreError {
    /// 안정적인 실패 코드
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidInput(_) => "INVALID_INPUT",
            CoreError::InvalidPrice => "INVALID_PRICE",
            CoreError::Unauthenticated => "UNAUTHENTICATED",
            CoreError::NotOwner => "NOT_OWNER",
            CoreError::NotSeller => "NOT_SELLER",
            CoreError::NotFound => "NOT_FOUND",
            CoreError::NoSuchRequest => "NO_SUCH_REQUEST",
            CoreError::AlreadyListed => "ALREADY_LISTED",
            CoreError::SaleNotActive => "SALE_NOT_ACTIVE",
            CoreError::SelfBid => "SELF_BID",
            CoreError::PriceTooLow => "PRICE_TOO_LOW",
            CoreError::PriceNotIncreasing => "PRICE_NOT_INCREASING",
            CoreError::SelfRequest => "SELF_REQUEST",
            CoreError::AlreadyFriends => "ALREADY_FRIENDS",
            CoreError::RequestAlreadySent => "REQUEST_ALREADY_SENT",
            CoreError::PendingFromOther => "PENDING_FROM_OTHER",
            CoreError::Store(_) => "STORE_FAILURE",
        }
    }

    /// HTTP 상태 코드 매핑
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::InvalidInput(_)
            | CoreError::InvalidPrice
            | CoreError::SelfBid
            | CoreError::PriceTooLow
            | CoreError::SelfRequest => StatusCode::BAD_REQUEST,
            CoreError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CoreError::NotOwner | CoreError::NotSeller => StatusCode::FORBIDDEN,
            CoreError::NotFound | CoreError::NoSuchRequest => StatusCode::NOT_FOUND,
            CoreError::AlreadyListed
            | CoreError::SaleNotActive
            | CoreError::PriceNotIncreasing
            | CoreError::AlreadyFriends
            | CoreError::RequestAlreadySent
            | CoreError::PendingFromOther => StatusCode::CONFLICT,
            CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        // 저장소 오류는 내부 세부 정보를 응답으로 노출하지 않는다
        if let CoreError::Store(e) = &self {
            error!("{:<12} --> 저장소 오류: {:?}", "Error", e);
        }
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}

/// 고유 인덱스 충돌 여부 (Postgres 23505)
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

// endregion: --- Core Error

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    /// 실패 코드와 상태 코드 매핑 확인
    #[test]
    fn test_error_codes_and_statuses() {
        let cases = [
            (CoreError::Unauthenticated, "UNAUTHENTICATED", StatusCode::UNAUTHORIZED),
            (CoreError::NotOwner, "NOT_OWNER", StatusCode::FORBIDDEN),
            (CoreError::AlreadyListed, "ALREADY_LISTED", StatusCode::CONFLICT),
            (CoreError::SaleNotActive, "SALE_NOT_ACTIVE", StatusCode::CONFLICT),
            (CoreError::PriceNotIncreasing, "PRICE_NOT_INCREASING", StatusCode::CONFLICT),
            (CoreError::NoSuchRequest, "NO_SUCH_REQUEST", StatusCode::NOT_FOUND),
            (CoreError::SelfBid, "SELF_BID", StatusCode::BAD_REQUEST),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status(), status);
        }
    }

    /// 저장소 오류 메시지는 내부 세부 정보를 포함하지 않는다
    #[test]
    fn test_store_error_is_opaque() {
        let err = CoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), "STORE_FAILURE");
        assert!(!err.to_string().contains("RowNotFound"));
    }
}

// endregion: --- Tests
