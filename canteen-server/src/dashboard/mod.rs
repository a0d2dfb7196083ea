//! Dashboard 模块 - 订单看板聚合
//!
//! 登录成功后为 Owner 组装订单看板：把订单、菜单项和餐厅记录
//! 联接为展示用的 [`DashboardEntry`] 序列。
//!
//! # 行为要点
//!
//! - 序列顺序与存储返回的订单顺序一致，并发解析不改变顺序
//! - 悬挂的菜单项引用按行丢弃，但会计数并记录日志 (不再静默丢失)
//! - 订单自身的餐厅引用缺失时，跳过该订单的整条看板记录
//! - 日期/时间固定为 UTC ISO 日期 + 24 小时制时间

mod aggregator;

pub use aggregator::DashboardAggregator;

use serde::{Deserialize, Serialize};

use crate::db::models::{OrderStatus, Restaurant};

/// 看板订单行 (menu item name + quantity)
///
/// Wire 格式沿用浏览器端既有的 camelCase 字段名。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLineItem {
    pub menu_item_name: String,
    pub quantity: i32,
}

/// 单个订单的看板视图 - 每次登录现场构建，从不落库
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub order_id: String,
    pub order_items: Vec<DashboardLineItem>,
    pub canteen_name: String,
    pub restaurant_address: String,
    pub order_status: OrderStatus,
    pub total_price: f64,
    /// 历史载荷同时携带 orderStatus 和 status，两者同值，保留兼容
    pub status: OrderStatus,
    pub expected_pickup_time: String,
    pub description: Option<String>,
    /// 创建日期，UTC `YYYY-MM-DD`
    pub date: String,
    /// 创建时间，UTC `HH:MM:SS` (24 小时制)
    pub time: String,
}

/// 聚合结果：看板序列 + 引用缺失的可观测计数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    pub entries: Vec<DashboardEntry>,
    /// 因菜单项被删除而丢弃的订单行数
    pub missing_menu_items: u32,
    /// 因餐厅引用缺失而整条跳过的订单数
    pub skipped_orders: u32,
}

/// 登录/看板接口返回的视图载荷
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    /// Owner 还没有餐厅 - 合法的终止状态，提示创建
    SetupRequired { message: String },
    /// 正常看板
    Dashboard {
        restaurant: Restaurant,
        orders: Vec<DashboardEntry>,
        missing_menu_items: u32,
        skipped_orders: u32,
    },
}

impl DashboardView {
    pub fn setup_required() -> Self {
        Self::SetupRequired {
            message: "Please add your restaurant details".to_string(),
        }
    }

    pub fn from_report(restaurant: Restaurant, report: DashboardReport) -> Self {
        Self::Dashboard {
            restaurant,
            orders: report.entries,
            missing_menu_items: report.missing_menu_items,
            skipped_orders: report.skipped_orders,
        }
    }
}
