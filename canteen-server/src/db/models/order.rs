//! Order Model
//!
//! 订单在本服务中是只读数据 (由顾客下单流程写入)；
//! 创建接口仅用于数据初始化和测试。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Preparing,
    Ready,
    PickedUp,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// 订单行：菜单项引用 + 数量 (顺序有意义)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRef {
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    pub quantity: i32,
}

/// Customer order against a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub order_items: Vec<OrderLineRef>,
    pub status: OrderStatus,
    pub order_total: f64,
    /// 期望取餐时间，由下单方填写的展示字符串
    pub expected_pickup_time: String,
    pub table_requests: Option<String>,
    /// 创建时间 (epoch 秒, UTC)
    pub created_date: i64,
}

/// Create order payload (seeding / tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Restaurant id as "restaurant:xxx"
    pub restaurant: String,
    pub order_items: Vec<OrderLineRefCreate>,
    pub status: OrderStatus,
    pub order_total: f64,
    pub expected_pickup_time: String,
    #[serde(default)]
    pub table_requests: Option<String>,
    /// 缺省时取当前时间
    #[serde(default)]
    pub created_date: Option<i64>,
}

/// 订单行创建载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRefCreate {
    /// Menu item id as "menu_item:xxx"
    pub item: String,
    pub quantity: i32,
}
