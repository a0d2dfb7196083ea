//! Dashboard API Handlers

use axum::{Extension, Json, extract::State};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::dashboard::DashboardView;
use crate::db::repository::RestaurantRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/dashboard - 重新组装当前 Owner 的订单看板
///
/// 纯读操作，重复调用不产生副作用。
pub async fn get_dashboard(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DashboardView>> {
    let owner: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::internal(format!("Malformed owner id in token: {}", user.id)))?;

    let restaurants = RestaurantRepository::new(state.get_db());
    let view = match restaurants.find_by_owner(&owner).await.map_err(AppError::from)? {
        Some(restaurant) => {
            let restaurant_id = restaurant
                .id
                .clone()
                .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;
            let report = state.aggregator().assemble(&restaurant_id).await?;
            DashboardView::from_report(restaurant, report)
        }
        None => DashboardView::setup_required(),
    };

    Ok(Json(view))
}
