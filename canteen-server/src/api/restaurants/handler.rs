//! Restaurant API Handlers
//!
//! 每个 Owner 至多一家餐厅：创建接口对重复创建返回 409。

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Restaurant, RestaurantCreate};
use crate::db::repository::RestaurantRepository;
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

fn parse_owner_id(user: &CurrentUser) -> AppResult<RecordId> {
    user.id
        .parse()
        .map_err(|_| AppError::internal(format!("Malformed owner id in token: {}", user.id)))
}

/// POST /api/restaurants - 为当前 Owner 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_required_text(&payload.name, "Restaurant name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "Address", MAX_ADDRESS_LEN)?;

    let owner = parse_owner_id(&user)?;
    let repo = RestaurantRepository::new(state.get_db());
    let restaurant = repo.create(owner, payload).await.map_err(AppError::from)?;

    tracing::info!(owner_id = %user.id, name = %restaurant.name, "Restaurant created");

    Ok(Json(restaurant))
}

/// GET /api/restaurants/mine - 当前 Owner 的餐厅
pub async fn mine(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Restaurant>> {
    let owner = parse_owner_id(&user)?;
    let repo = RestaurantRepository::new(state.get_db());
    let restaurant = repo
        .find_by_owner(&owner)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("No restaurant registered for this owner"))?;
    Ok(Json(restaurant))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {}", id)))?;
    let repo = RestaurantRepository::new(state.get_db());
    let restaurant = repo
        .find_by_id(&record_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    Ok(Json(restaurant))
}

/// DELETE /api/restaurants/{id} - 仅限本人
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid restaurant ID: {}", id)))?;
    let repo = RestaurantRepository::new(state.get_db());

    let restaurant = repo
        .find_by_id(&record_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;

    if restaurant.owner.to_string() != user.id {
        return Err(AppError::forbidden("Restaurant belongs to another owner"));
    }

    repo.delete(&record_id).await.map_err(AppError::from)?;

    tracing::info!(owner_id = %user.id, restaurant_id = %id, "Restaurant deleted");

    Ok(Json(true))
}
