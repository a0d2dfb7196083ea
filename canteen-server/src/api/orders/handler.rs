//! Order API Handlers
//!
//! 订单由顾客端系统写入，这里只读 + 一个用于录入的创建接口。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::{OrderRepository, RestaurantRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub restaurant: Option<String>,
}

/// GET /api/orders?restaurant=... - 按餐厅列出订单 (存储顺序)
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let restaurant: RecordId = match query.restaurant {
        Some(id) => id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {}", id)))?,
        None => {
            let repo = RestaurantRepository::new(state.get_db());
            let owner: RecordId = user
                .id
                .parse()
                .map_err(|_| AppError::internal(format!("Malformed owner id in token: {}", user.id)))?;
            repo.find_by_owner(&owner)
                .await
                .map_err(AppError::from)?
                .and_then(|r| r.id)
                .ok_or_else(|| AppError::not_found("No restaurant registered for this owner"))?
        }
    };

    let repo = OrderRepository::new(state.get_db());
    let orders = repo
        .find_by_restaurant(&restaurant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid order ID: {}", id)))?;
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&record_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - 创建订单 (录入/测试路径)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if payload.order_items.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    let repo = OrderRepository::new(state.get_db());
    let order = repo.create(payload).await.map_err(AppError::from)?;

    Ok(Json(order))
}
