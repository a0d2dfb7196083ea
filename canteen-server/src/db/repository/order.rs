//! Order Repository
//!
//! Read access to customer orders; create exists for seeding and tests.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, OrderLineRef, OrderStatus};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// All orders of a restaurant, in store order (no explicit sort —
    /// 看板序列保持存储返回顺序)
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE restaurant = $restaurant")
            .bind(("restaurant", restaurant.clone()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Create an order
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let restaurant: RecordId = data
            .restaurant
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid restaurant ID: {}", data.restaurant)))?;

        let mut order_items = Vec::with_capacity(data.order_items.len());
        for line in data.order_items {
            let item: RecordId = line
                .item
                .parse()
                .map_err(|_| RepoError::Validation(format!("Invalid menu item ID: {}", line.item)))?;
            if line.quantity <= 0 {
                return Err(RepoError::Validation(
                    "Line item quantity must be positive".to_string(),
                ));
            }
            order_items.push(OrderLineRef {
                item,
                quantity: line.quantity,
            });
        }

        let created_date = data.created_date.unwrap_or_else(time::now_epoch_secs);
        let status: OrderStatus = data.status;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    restaurant = $restaurant,
                    order_items = $order_items,
                    status = $status,
                    order_total = $order_total,
                    expected_pickup_time = $expected_pickup_time,
                    table_requests = $table_requests,
                    created_date = $created_date
                RETURN AFTER"#,
            )
            .bind(("restaurant", restaurant))
            .bind(("order_items", order_items))
            .bind(("status", status))
            .bind(("order_total", data.order_total))
            .bind(("expected_pickup_time", data.expected_pickup_time))
            .bind(("table_requests", data.table_requests))
            .bind(("created_date", created_date))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }
}
