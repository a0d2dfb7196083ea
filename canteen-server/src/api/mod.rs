//! API 模块 - HTTP 路由和处理函数
//!
//! 每个资源一个子模块，内部提供 `router()`，由
//! [`crate::core::server::build_app`] 合并。

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod owners;
pub mod restaurants;
