//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Restaurant, RestaurantCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find restaurant by id ("restaurant:xxx")
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Restaurant>> {
        let restaurant: Option<Restaurant> = self.base.db().select(id.clone()).await?;
        Ok(restaurant)
    }

    /// Find the restaurant owned by the given owner.
    ///
    /// LIMIT 1: 本流程假设每个 Owner 至多一家餐厅 (创建接口保证)。
    pub async fn find_by_owner(&self, owner: &RecordId) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE owner = $owner LIMIT 1")
            .bind(("owner", owner.clone()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create the owner's restaurant
    ///
    /// 同一 Owner 重复创建返回 Duplicate。
    pub async fn create(&self, owner: RecordId, data: RestaurantCreate) -> RepoResult<Restaurant> {
        if self.find_by_owner(&owner).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Owner already has a restaurant".to_string(),
            ));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE restaurant SET
                    owner = $owner,
                    name = $name,
                    address = $address
                RETURN AFTER"#,
            )
            .bind(("owner", owner))
            .bind(("name", data.name))
            .bind(("address", data.address))
            .await?;

        let created: Option<Restaurant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Delete restaurant by id (admin/testing path)
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Option<Restaurant> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
