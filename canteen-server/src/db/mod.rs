//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 引擎) 的连接与模式定义。

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path` and apply schema.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("canteen")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready (embedded SurrealDB, RocksDB engine)");

        Ok(Self { db })
    }
}

/// Idempotent schema definition.
///
/// Owner email/username uniqueness is enforced here with UNIQUE indexes;
/// repositories still pre-check duplicates so the API can return friendly
/// Conflict messages instead of raw index errors.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    const SCHEMA: &str = r#"
        DEFINE TABLE IF NOT EXISTS owner SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS owner_email_unique ON TABLE owner FIELDS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS owner_username_unique ON TABLE owner FIELDS username UNIQUE;

        DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS restaurant_owner_idx ON TABLE restaurant FIELDS owner;

        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS menu_item_restaurant_idx ON TABLE menu_item FIELDS restaurant;

        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS order_restaurant_idx ON TABLE order FIELDS restaurant;
    "#;

    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

    Ok(())
}
