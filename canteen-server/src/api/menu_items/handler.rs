//! Menu Item API Handlers
//!
//! 删除菜单项不会级联清理历史订单中的引用；
//! 看板聚合负责按行丢弃悬挂引用并计数。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate};
use crate::db::repository::{MenuItemRepository, RestaurantRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MenuItemQuery {
    pub restaurant: Option<String>,
}

/// 校验目标餐厅属于当前 Owner
async fn ensure_owns_restaurant(
    state: &ServerState,
    user: &CurrentUser,
    restaurant: &RecordId,
) -> AppResult<()> {
    let repo = RestaurantRepository::new(state.get_db());
    let found = repo
        .find_by_id(restaurant)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", restaurant)))?;

    if found.owner.to_string() != user.id {
        return Err(AppError::forbidden("Restaurant belongs to another owner"));
    }
    Ok(())
}

/// POST /api/menu-items - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "Menu item name", MAX_NAME_LEN)?;
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("Price must be a non-negative number"));
    }

    let restaurant: RecordId = payload
        .restaurant
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {}", payload.restaurant)))?;
    ensure_owns_restaurant(&state, &user, &restaurant).await?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(owner_id = %user.id, name = %item.name, "Menu item created");

    Ok(Json(item))
}

/// GET /api/menu-items?restaurant=... - 按餐厅列出菜单项
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MenuItemQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let restaurant: RecordId = match query.restaurant {
        Some(id) => id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {}", id)))?,
        // 缺省为当前 Owner 的餐厅
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

    let repo = MenuItemRepository::new(state.get_db());
    let items = repo
        .find_by_restaurant(&restaurant)
        .await
        .map_err(AppError::from)?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid menu item ID: {}", id)))?;
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&record_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - 仅限餐厅所属 Owner
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid menu item ID: {}", id)))?;
    let repo = MenuItemRepository::new(state.get_db());

    let item = repo
        .find_by_id(&record_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    ensure_owns_restaurant(&state, &user, &item.restaurant).await?;

    repo.delete(&record_id).await.map_err(AppError::from)?;

    tracing::info!(owner_id = %user.id, menu_item_id = %id, "Menu item deleted");

    Ok(Json(true))
}
