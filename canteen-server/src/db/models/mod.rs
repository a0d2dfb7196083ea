//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod owner;

// Restaurant domain
pub mod menu_item;
pub mod restaurant;

// Orders
pub mod order;

// Re-exports
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId};
pub use order::{Order, OrderCreate, OrderLineRef, OrderLineRefCreate, OrderStatus};
pub use owner::{Owner, OwnerCreate, OwnerId, OwnerInfo, OwnerUpdate};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantId};
