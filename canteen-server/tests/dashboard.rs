//! Dashboard assembly against the embedded store: joins, dangling
//! references, ordering and idempotence.
//! Run: cargo test -p canteen-server --test dashboard

use canteen_server::DashboardAggregator;
use canteen_server::db::define_schema;
use canteen_server::db::models::{
    MenuItemCreate, OrderCreate, OrderLineRefCreate, OrderStatus, OwnerCreate, RestaurantCreate,
};
use canteen_server::db::repository::{
    MenuItemRepository, OrderRepository, OwnerRepository, RestaurantRepository,
};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::{Db, RocksDb};

async fn open_db() -> (Surreal<Db>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("canteen").use_db("main").await.unwrap();
    define_schema(&db).await.unwrap();
    (db, tmp)
}

/// Seed an owner with a restaurant, return the restaurant id.
async fn seed_restaurant(db: &Surreal<Db>) -> RecordId {
    let owner = OwnerRepository::new(db.clone())
        .create(OwnerCreate {
            email: "maria@example.com".to_string(),
            password: "hunter2!".to_string(),
            name: "Maria Lopez".to_string(),
            phone: "1234567890".to_string(),
            username: "maria_lopez".to_string(),
        })
        .await
        .unwrap();

    RestaurantRepository::new(db.clone())
        .create(
            owner.id.unwrap(),
            RestaurantCreate {
                name: "Noodle Corner".to_string(),
                address: "1 Campus Way".to_string(),
            },
        )
        .await
        .unwrap()
        .id
        .unwrap()
}

async fn seed_menu_item(db: &Surreal<Db>, restaurant: &RecordId, name: &str, price: f64) -> RecordId {
    MenuItemRepository::new(db.clone())
        .create(MenuItemCreate {
            name: name.to_string(),
            price,
            restaurant: restaurant.to_string(),
        })
        .await
        .unwrap()
        .id
        .unwrap()
}

async fn seed_order(
    db: &Surreal<Db>,
    restaurant: &RecordId,
    lines: &[(&RecordId, i32)],
    total: f64,
) -> RecordId {
    OrderRepository::new(db.clone())
        .create(OrderCreate {
            restaurant: restaurant.to_string(),
            order_items: lines
                .iter()
                .map(|(item, quantity)| OrderLineRefCreate {
                    item: item.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            status: OrderStatus::Placed,
            order_total: total,
            expected_pickup_time: "12:30".to_string(),
            table_requests: Some("No onions".to_string()),
            created_date: Some(1_709_298_309), // 2024-03-01T13:05:09Z
        })
        .await
        .unwrap()
        .id
        .unwrap()
}

#[tokio::test]
async fn joins_orders_menu_items_and_restaurant() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;
    let ramen = seed_menu_item(&db, &restaurant, "Ramen", 9.5).await;
    let gyoza = seed_menu_item(&db, &restaurant, "Gyoza", 4.0).await;
    seed_order(&db, &restaurant, &[(&ramen, 2), (&gyoza, 1)], 23.0).await;

    let report = DashboardAggregator::new(db, 8)
        .assemble(&restaurant)
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.missing_menu_items, 0);
    assert_eq!(report.skipped_orders, 0);

    let entry = &report.entries[0];
    assert_eq!(entry.canteen_name, "Noodle Corner");
    assert_eq!(entry.restaurant_address, "1 Campus Way");
    assert_eq!(entry.order_status, OrderStatus::Placed);
    assert_eq!(entry.total_price, 23.0);
    assert_eq!(entry.expected_pickup_time, "12:30");
    assert_eq!(entry.description.as_deref(), Some("No onions"));
    assert_eq!(entry.date, "2024-03-01");
    assert_eq!(entry.time, "13:05:09");

    // 行顺序与订单记录一致
    assert_eq!(entry.order_items.len(), 2);
    assert_eq!(entry.order_items[0].menu_item_name, "Ramen");
    assert_eq!(entry.order_items[0].quantity, 2);
    assert_eq!(entry.order_items[1].menu_item_name, "Gyoza");
    assert_eq!(entry.order_items[1].quantity, 1);
}

#[tokio::test]
async fn dangling_menu_item_drops_only_that_line() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;
    let ramen = seed_menu_item(&db, &restaurant, "Ramen", 9.5).await;
    let gyoza = seed_menu_item(&db, &restaurant, "Gyoza", 4.0).await;
    seed_order(&db, &restaurant, &[(&ramen, 2), (&gyoza, 1)], 23.0).await;

    // 菜单项被删除后订单里留下悬挂引用
    MenuItemRepository::new(db.clone())
        .delete(&gyoza)
        .await
        .unwrap();

    let report = DashboardAggregator::new(db, 8)
        .assemble(&restaurant)
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.missing_menu_items, 1);
    assert_eq!(report.skipped_orders, 0);

    let entry = &report.entries[0];
    assert_eq!(entry.order_items.len(), 1);
    assert_eq!(entry.order_items[0].menu_item_name, "Ramen");
    // 总价来自订单记录，不受丢行影响
    assert_eq!(entry.total_price, 23.0);
}

#[tokio::test]
async fn missing_restaurant_skips_the_whole_order() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;
    let ramen = seed_menu_item(&db, &restaurant, "Ramen", 9.5).await;
    seed_order(&db, &restaurant, &[(&ramen, 1)], 9.5).await;

    RestaurantRepository::new(db.clone())
        .delete(&restaurant)
        .await
        .unwrap();

    let report = DashboardAggregator::new(db, 8)
        .assemble(&restaurant)
        .await
        .unwrap();

    // 订单还在，但餐厅引用解析不出来：整条跳过
    assert_eq!(report.entries.len(), 0);
    assert_eq!(report.skipped_orders, 1);
}

#[tokio::test]
async fn concurrent_assembly_preserves_store_order() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;
    let ramen = seed_menu_item(&db, &restaurant, "Ramen", 9.5).await;

    for i in 0..6 {
        seed_order(&db, &restaurant, &[(&ramen, 1 + i)], 9.5 * (1 + i) as f64).await;
    }

    let stored = OrderRepository::new(db.clone())
        .find_by_restaurant(&restaurant)
        .await
        .unwrap();
    let stored_ids: Vec<String> = stored
        .iter()
        .map(|o| o.id.as_ref().unwrap().to_string())
        .collect();

    // 并发上限小于订单数，强制分批
    let report = DashboardAggregator::new(db, 2)
        .assemble(&restaurant)
        .await
        .unwrap();

    let entry_ids: Vec<String> = report.entries.iter().map(|e| e.order_id.clone()).collect();
    assert_eq!(entry_ids, stored_ids);
}

#[tokio::test]
async fn assembly_is_idempotent() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;
    let ramen = seed_menu_item(&db, &restaurant, "Ramen", 9.5).await;
    let gyoza = seed_menu_item(&db, &restaurant, "Gyoza", 4.0).await;
    seed_order(&db, &restaurant, &[(&ramen, 2)], 19.0).await;
    seed_order(&db, &restaurant, &[(&gyoza, 3)], 12.0).await;

    let aggregator = DashboardAggregator::new(db, 4);
    let first = aggregator.assemble(&restaurant).await.unwrap();
    let second = aggregator.assemble(&restaurant).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_restaurant_yields_empty_dashboard() {
    let (db, _tmp) = open_db().await;
    let restaurant = seed_restaurant(&db).await;

    let report = DashboardAggregator::new(db, 4)
        .assemble(&restaurant)
        .await
        .unwrap();

    assert!(report.entries.is_empty());
    assert_eq!(report.missing_menu_items, 0);
    assert_eq!(report.skipped_orders, 0);
}
