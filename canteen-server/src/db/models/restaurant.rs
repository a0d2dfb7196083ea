//! Restaurant Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Restaurant ID type
pub type RestaurantId = RecordId;

/// Restaurant - 每个 Owner 至多一家 (由创建接口保证)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RestaurantId>,
    #[serde(with = "serde_helpers::record_id")]
    pub owner: RecordId,
    pub name: String,
    pub address: String,
}

/// Create restaurant payload (owner 来自令牌，不在请求体中)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
}
