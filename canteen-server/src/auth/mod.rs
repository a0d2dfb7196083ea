//! 认证模块
//!
//! JWT 令牌生成/验证与认证中间件。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
