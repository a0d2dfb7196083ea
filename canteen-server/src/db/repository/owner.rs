//! Owner Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Owner, OwnerCreate, OwnerUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OwnerRepository {
    base: BaseRepository,
}

impl OwnerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all owners
    pub async fn find_all(&self) -> RepoResult<Vec<Owner>> {
        let owners: Vec<Owner> = self
            .base
            .db()
            .query("SELECT * FROM owner ORDER BY username")
            .await?
            .take(0)?;
        Ok(owners)
    }

    /// Find owner by id ("owner:xxx")
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Owner>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let owner: Option<Owner> = self.base.db().select(thing).await?;
        Ok(owner)
    }

    /// Find owner by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Owner>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM owner WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let owners: Vec<Owner> = result.take(0)?;
        Ok(owners.into_iter().next())
    }

    /// Find owner by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Owner>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM owner WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let owners: Vec<Owner> = result.take(0)?;
        Ok(owners.into_iter().next())
    }

    /// Create a new owner (signup)
    ///
    /// 预检 email/username 重复，底层 UNIQUE 索引兜底。
    pub async fn create(&self, data: OwnerCreate) -> RepoResult<Owner> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Owner with email '{}' already exists",
                data.email
            )));
        }
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        // Hash password
        let hash_pass = Owner::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE owner SET
                    email = $email,
                    username = $username,
                    hash_pass = $hash_pass,
                    name = $name,
                    phone = $phone
                RETURN AFTER"#,
            )
            .bind(("email", data.email))
            .bind(("username", data.username))
            .bind(("hash_pass", hash_pass))
            .bind(("name", data.name))
            .bind(("phone", data.phone))
            .await?;

        let created: Option<Owner> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create owner".to_string()))
    }

    /// Update the owner identified by username (token subject)
    ///
    /// 仅合并给定字段；password 在此处重新哈希为 hash_pass。
    pub async fn update_by_username(
        &self,
        username: &str,
        data: OwnerUpdate,
    ) -> RepoResult<Owner> {
        let existing = self
            .find_by_username(username)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Owner '{}'", username)))?;
        let id = existing
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Owner record has no id".to_string()))?;

        // Duplicate checks against *other* owners
        if let Some(ref email) = data.email
            && let Some(other) = self.find_by_email(email).await?
            && other.username != username
        {
            return Err(RepoError::Duplicate(format!(
                "Owner with email '{}' already exists",
                email
            )));
        }
        if let Some(ref new_username) = data.username
            && new_username != username
            && self.find_by_username(new_username).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                new_username
            )));
        }

        let mut merge = serde_json::Map::new();
        if let Some(email) = data.email {
            merge.insert("email".into(), email.into());
        }
        if let Some(new_username) = data.username {
            merge.insert("username".into(), new_username.into());
        }
        if let Some(name) = data.name {
            merge.insert("name".into(), name.into());
        }
        if let Some(phone) = data.phone {
            merge.insert("phone".into(), phone.into());
        }
        if let Some(password) = data.password {
            let hash_pass = Owner::hash_password(&password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
            merge.insert("hash_pass".into(), hash_pass.into());
        }

        if merge.is_empty() {
            return Ok(existing);
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", id))
            .bind(("data", serde_json::Value::Object(merge)))
            .await?;

        let updated: Option<Owner> = result.take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update owner".to_string()))
    }

    /// Delete owner by id, returns whether a record was removed
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let deleted: Option<Owner> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}
