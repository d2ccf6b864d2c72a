/// 판매 중 목록 조회 (상품 요약 포함, 최신순, 동률은 id 내림차순)
pub const GET_ACTIVE_SALES: &str = r#"
    SELECT s.id, s.item_id, s.seller_id, s.floor_price, s.status, s.created_at,
           i.name AS item_name, i.image_ref AS item_image_ref
    FROM sales s
    JOIN items i ON i.id = s.item_id
    WHERE s.status = 'active'
    ORDER BY s.created_at DESC, s.id DESC
"#;

/// 판매 입찰 목록 조회 (가격 내림차순, 동률은 최신순)
pub const GET_SALE_BIDS: &str = r#"
    SELECT id, sale_id, bidder_id, bid_price, created_at
    FROM bids
    WHERE sale_id = $1
    ORDER BY bid_price DESC, created_at DESC
"#;

/// 상품 조회
pub const GET_ITEM: &str =
    "SELECT id, owner_id, name, image_ref, created_at FROM items WHERE id = $1";

/// 사용자 조회
pub const GET_USER: &str =
    "SELECT id, first, last, about, interests, image_ref, online FROM users WHERE id = $1";

/// 사용자 게시글 조회 (최신순)
pub const GET_USER_POSTS: &str = r#"
    SELECT id, user_id, content, created_at
    FROM posts
    WHERE user_id = $1
    ORDER BY created_at DESC, id DESC
"#;

/// 쌍 엣지 조회 (방향 무관)
pub const GET_PAIR_EDGE: &str = r#"
    SELECT id, user_id, friend_id, status
    FROM friends
    WHERE (user_id = $1 AND friend_id = $2)
       OR (user_id = $2 AND friend_id = $1)
"#;

/// 사람 목록 조회 (본인 제외, 쌍 엣지 포함, id 내림차순)
pub const GET_PEOPLE: &str = r#"
    SELECT u.id, u.first, u.last, u.about, u.interests, u.image_ref, u.online,
           f.id AS edge_id, f.user_id AS edge_user_id,
           f.friend_id AS edge_friend_id, f.status AS edge_status
    FROM users u
    LEFT JOIN friends f
           ON (f.user_id = u.id AND f.friend_id = $1)
           OR (f.user_id = $1 AND f.friend_id = u.id)
    WHERE u.id != $1
    ORDER BY u.id DESC
"#;

/// 친구 목록 조회 (수락된 엣지, 방향 무관)
pub const GET_FRIENDS: &str = r#"
    SELECT u.id, u.first, u.last, u.about, u.interests, u.image_ref, u.online
    FROM friends f
    JOIN users u
      ON u.id = CASE WHEN f.user_id = $1 THEN f.friend_id ELSE f.user_id END
    WHERE (f.user_id = $1 OR f.friend_id = $1)
      AND f.status = 'accepted'
    ORDER BY u.id DESC
"#;
