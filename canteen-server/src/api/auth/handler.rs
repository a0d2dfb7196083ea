//! Authentication Handlers
//!
//! Handles login, logout, and current-owner lookup. Login is the hot path:
//! it authenticates the credentials, binds a server-side session and
//! assembles the order dashboard in one round trip.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::dashboard::DashboardView;
use crate::db::models::OwnerInfo;
use crate::db::repository::{OwnerRepository, RestaurantRepository};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: token + session + the assembled dashboard view
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// 剩余有效秒数 (固定 2 小时窗口)
    pub expires_in: i64,
    pub session_id: String,
    pub owner: OwnerInfo,
    pub view: DashboardView,
}

/// POST /api/auth/login
///
/// 认证流程：
/// 1. 按用户名查 Owner (固定延迟防计时攻击)
/// 2. argon2 校验密码 - 用户不存在/密码错误/哈希损坏统一返回同一错误
/// 3. 签发 2 小时令牌并绑定会话
/// 4. 查 Owner 的餐厅：没有则返回 setup_required，有则现场聚合看板
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let owners = OwnerRepository::new(state.get_db());
    let username = req.username.clone();

    let owner = owners
        .find_by_username(&username)
        .await
        .map_err(AppError::from)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error for all three failure shapes - no username enumeration
    let owner = match owner {
        Some(o) => {
            let password_valid = o.verify_password(&req.password).unwrap_or_else(|e| {
                // 哈希解析失败按验证失败处理 (fail closed)
                tracing::error!(username = %username, error = %e, "Password hash verification error");
                false
            });

            if !password_valid {
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            o
        }
        None => {
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Generate JWT token
    let jwt_service = state.get_jwt_service();
    let owner_id = owner.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = jwt_service
        .generate_token(&owner_id, &owner.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    // Bind the server-side session; TTL matches the token window
    let owner_info = OwnerInfo::from(&owner);
    let session = state
        .sessions
        .bind(token.clone(), owner_info.clone(), jwt_service.ttl_seconds());

    // Assemble the dashboard view
    let restaurants = RestaurantRepository::new(state.get_db());
    let view = match owner.id.as_ref() {
        Some(id) => match restaurants.find_by_owner(id).await.map_err(AppError::from)? {
            Some(restaurant) => {
                let restaurant_id = restaurant
                    .id
                    .clone()
                    .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;
                let report = state.aggregator().assemble(&restaurant_id).await?;
                DashboardView::from_report(restaurant, report)
            }
            // 还没有餐厅：合法的终止状态，提示创建
            None => DashboardView::setup_required(),
        },
        None => DashboardView::setup_required(),
    };

    tracing::info!(
        owner_id = %owner_id,
        username = %owner.username,
        session_id = %session.session_id,
        "Owner logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        expires_in: jwt_service.ttl_seconds(),
        session_id: session.session_id,
        owner: owner_info,
        view,
    }))
}

/// GET /api/auth/me - 当前登录 Owner 的信息 (取数据库最新值)
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<OwnerInfo>> {
    let owners = OwnerRepository::new(state.get_db());
    let owner = owners
        .find_by_username(&user.username)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Owner '{}'", user.username)))?;

    Ok(Json(OwnerInfo::from(&owner)))
}

/// POST /api/auth/logout - 销毁该 Owner 的全部会话
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<()>> {
    let revoked = state.sessions.revoke_for_owner(&user.id);

    tracing::info!(
        owner_id = %user.id,
        username = %user.username,
        revoked,
        "Owner logged out"
    );

    Ok(Json(()))
}
