//! Owner API Handlers
//!
//! 注册是唯一的公共写入口 (无令牌)；更新/删除要求登录，
//! 更新的目标由令牌里的用户名决定，而不是路径参数。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{OwnerCreate, OwnerInfo, OwnerUpdate};
use crate::db::repository::OwnerRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_phone, validate_required_text,
    validate_username,
};
use crate::utils::{AppError, AppResult};

/// GET /api/owners 的查询参数 - email/username 二选一可选
#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
    pub username: Option<String>,
}

/// 列表接口的响应：精确查询返回单条，否则返回全部
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OwnerListResponse {
    One(OwnerInfo),
    Many(Vec<OwnerInfo>),
}

fn validate_signup(payload: &OwnerCreate) -> AppResult<()> {
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_username(&payload.username)?;
    validate_phone(&payload.phone)?;
    validate_required_text(&payload.name, "Name", MAX_NAME_LEN)?;
    Ok(())
}

/// POST /api/owners - 注册 (公共路由)
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<OwnerCreate>,
) -> AppResult<Json<OwnerInfo>> {
    validate_signup(&payload)?;

    let repo = OwnerRepository::new(state.get_db());
    let owner = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(username = %owner.username, "Owner account created");

    Ok(Json(OwnerInfo::from(&owner)))
}

/// GET /api/owners - 列表 / 按 email 或 username 精确查询
///
/// 精确查询未命中返回 404。
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<OwnerListResponse>> {
    let repo = OwnerRepository::new(state.get_db());

    if let Some(email) = query.email {
        let owner = repo
            .find_by_email(&email)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Owner with email '{}'", email)))?;
        return Ok(Json(OwnerListResponse::One(OwnerInfo::from(&owner))));
    }

    if let Some(username) = query.username {
        let owner = repo
            .find_by_username(&username)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Owner '{}'", username)))?;
        return Ok(Json(OwnerListResponse::One(OwnerInfo::from(&owner))));
    }

    let owners = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(OwnerListResponse::Many(
        owners.iter().map(OwnerInfo::from).collect(),
    )))
}

/// GET /api/owners/{id} - 按 id 获取
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OwnerInfo>> {
    let repo = OwnerRepository::new(state.get_db());
    let owner = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Owner {}", id)))?;
    Ok(Json(OwnerInfo::from(&owner)))
}

/// PUT /api/owners - 更新当前登录的 Owner
///
/// 目标记录由令牌中的用户名确定。
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OwnerUpdate>,
) -> AppResult<Json<OwnerInfo>> {
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }
    if let Some(ref username) = payload.username {
        validate_username(username)?;
    }
    if let Some(ref phone) = payload.phone {
        validate_phone(phone)?;
    }
    if let Some(ref name) = payload.name {
        validate_required_text(name, "Name", MAX_NAME_LEN)?;
    }

    let repo = OwnerRepository::new(state.get_db());
    let owner = repo
        .update_by_username(&user.username, payload)
        .await
        .map_err(AppError::from)?;

    tracing::info!(owner_id = %user.id, "Owner profile updated");

    Ok(Json(OwnerInfo::from(&owner)))
}

/// DELETE /api/owners/{id} - 删除账户并销毁其会话
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OwnerRepository::new(state.get_db());
    let removed = repo.delete(&id).await.map_err(AppError::from)?;

    if !removed {
        return Err(AppError::not_found(format!("Owner {}", id)));
    }

    // 账户没了，会话也必须失效
    let revoked = state.sessions.revoke_for_owner(&id);

    tracing::info!(owner_id = %id, revoked, "Owner account deleted");

    Ok(Json(true))
}
