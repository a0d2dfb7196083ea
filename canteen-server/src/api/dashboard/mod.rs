//! Dashboard API 模块
//!
//! 登录响应里已经带看板；这个接口用于页面刷新时重新拉取，
//! 走同一条聚合路径。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(handler::get_dashboard))
}
