//! Owner API 模块

mod handler;

pub use handler::{OwnerListResponse, OwnerQuery};

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/owners", owner_routes())
}

fn owner_routes() -> Router<ServerState> {
    Router::new()
        // PUT 更新的目标由令牌决定，不走路径参数
        .route(
            "/",
            get(handler::list).post(handler::signup).put(handler::update),
        )
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
}
