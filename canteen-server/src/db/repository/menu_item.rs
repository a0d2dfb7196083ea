//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    /// Find all menu items for a restaurant
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant = $restaurant ORDER BY name")
            .bind(("restaurant", restaurant.clone()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Create a menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let restaurant: RecordId = data
            .restaurant
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid restaurant ID: {}", data.restaurant)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE menu_item SET
                    name = $name,
                    price = $price,
                    restaurant = $restaurant
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("price", data.price))
            .bind(("restaurant", restaurant))
            .await?;

        let created: Option<MenuItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Delete menu item by id
    ///
    /// 删除后订单中的引用成为悬挂引用，看板聚合会按行丢弃并计数。
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Option<MenuItem> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
