//! Order Aggregator
//!
//! 把一家餐厅的订单联接为看板序列。所有解析都是按 id 的纯读操作，
//! 可以安全并发；通过有界 `buffered` 流控制同时进行的存储查询数，
//! 且保持输入顺序。

use futures::{StreamExt, stream};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Order;
use crate::db::repository::{MenuItemRepository, OrderRepository, RestaurantRepository};
use crate::utils::{AppError, AppResult, time};

use super::{DashboardEntry, DashboardLineItem, DashboardReport};

/// 看板聚合器
#[derive(Clone)]
pub struct DashboardAggregator {
    orders: OrderRepository,
    menu_items: MenuItemRepository,
    restaurants: RestaurantRepository,
    /// 同时在途的按 id 查询上限
    concurrency: usize,
}

impl DashboardAggregator {
    pub fn new(db: Surreal<Db>, concurrency: usize) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db),
            concurrency: concurrency.max(1),
        }
    }

    /// Assemble the dashboard for one restaurant.
    ///
    /// 输出序列与 `OrderRepository::find_by_restaurant` 返回的订单顺序
    /// 一一对应 (缺整条记录的跳过订单除外)；`buffered` 保证并发解析
    /// 不会重排结果。
    pub async fn assemble(&self, restaurant_id: &RecordId) -> AppResult<DashboardReport> {
        let orders = self.orders.find_by_restaurant(restaurant_id).await?;

        let results: Vec<Result<(DashboardEntry, u32), AppError>> = stream::iter(orders)
            .map(|order| self.assemble_entry(order))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut entries = Vec::with_capacity(results.len());
        let mut missing_menu_items = 0u32;
        let mut skipped_orders = 0u32;

        for result in results {
            match result {
                Ok((entry, dropped)) => {
                    missing_menu_items += dropped;
                    entries.push(entry);
                }
                // 餐厅引用缺失：只丢这一条，不让整个看板失败
                Err(AppError::IntegrityViolation(msg)) => {
                    tracing::warn!(target: "dashboard", error = %msg, "Skipping order entry");
                    skipped_orders += 1;
                }
                Err(other) => return Err(other),
            }
        }

        if missing_menu_items > 0 || skipped_orders > 0 {
            tracing::warn!(
                target: "dashboard",
                restaurant = %restaurant_id,
                missing_menu_items,
                skipped_orders,
                "Dashboard assembled with referential gaps"
            );
        }

        Ok(DashboardReport {
            entries,
            missing_menu_items,
            skipped_orders,
        })
    }

    /// 组装单个订单的看板记录，返回 (记录, 丢弃的行数)。
    ///
    /// 餐厅引用缺失时返回 `IntegrityViolation`，由调用方按订单跳过。
    async fn assemble_entry(&self, order: Order) -> Result<(DashboardEntry, u32), AppError> {
        let order_id = order.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

        // 1. 按原始顺序解析每个订单行的菜单项 (并发、保序)
        let line_results: Vec<Result<DashboardLineItem, AppError>> =
            stream::iter(order.order_items.iter().cloned())
                .map(|line| {
                    let repo = self.menu_items.clone();
                    async move {
                        match repo.find_by_id(&line.item).await? {
                            Some(menu_item) => Ok(DashboardLineItem {
                                menu_item_name: menu_item.name,
                                quantity: line.quantity,
                            }),
                            None => Err(AppError::integrity(format!(
                                "Menu item {} no longer exists",
                                line.item
                            ))),
                        }
                    }
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut order_items = Vec::with_capacity(line_results.len());
        let mut dropped = 0u32;
        for line in line_results {
            match line {
                Ok(item) => order_items.push(item),
                // 悬挂引用：该行从展示中省略，但计数 + 记日志
                Err(AppError::IntegrityViolation(msg)) => {
                    tracing::warn!(
                        target: "dashboard",
                        order = %order_id,
                        error = %msg,
                        "Dropping dangling line item"
                    );
                    dropped += 1;
                }
                Err(other) => return Err(other),
            }
        }

        // 2. 重新解析订单自身的餐厅引用。canteenName/restaurantAddress
        //    必须取自这次解析的记录，而不是外层查到的餐厅。
        let restaurant = self
            .restaurants
            .find_by_id(&order.restaurant)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!(
                    "Restaurant {} referenced by order {} no longer exists",
                    order.restaurant, order_id
                ))
            })?;

        // 3. 其余字段直接来自订单记录；日期/时间用固定 UTC 格式
        let entry = DashboardEntry {
            order_id,
            order_items,
            canteen_name: restaurant.name,
            restaurant_address: restaurant.address,
            order_status: order.status,
            total_price: order.order_total,
            status: order.status,
            expected_pickup_time: order.expected_pickup_time,
            description: order.table_requests,
            date: time::format_date(order.created_date),
            time: time::format_time(order.created_date),
        };

        Ok((entry, dropped))
    }
}
