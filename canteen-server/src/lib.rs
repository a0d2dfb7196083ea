//! Canteen Server - 餐厅老板端订单看板后台
//!
//! # 架构概述
//!
//! 为餐厅老板 (Owner) 提供账户和订单看板服务：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系，令牌有效期固定 2 小时
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (owner / restaurant / menu_item / order)
//! - **看板聚合** (`dashboard`): 登录时把订单、菜单项和餐厅联接为看板序列
//! - **会话** (`session`): 服务端会话存储，登出显式销毁
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! canteen-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── dashboard/     # 订单看板聚合
//! ├── session/       # 服务端会话
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、校验、时间
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use dashboard::{DashboardAggregator, DashboardEntry, DashboardReport, DashboardView};
pub use session::{Session, SessionStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
