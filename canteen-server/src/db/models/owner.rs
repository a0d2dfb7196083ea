//! Owner Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Owner ID type
pub type OwnerId = RecordId;

/// Owner account (restaurant operator, distinct from customers)
///
/// `email` and `username` are globally unique (UNIQUE indexes, see db schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OwnerId>,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub name: String,
    pub phone: String,
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerCreate {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub username: String,
}

/// Update payload - 所有字段可选，仅更新给定字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Owner 响应视图 (不含密码哈希)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerInfo {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub phone: String,
}

impl From<&Owner> for OwnerInfo {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            email: owner.email.clone(),
            username: owner.username.clone(),
            name: owner.name.clone(),
            phone: owner.phone.clone(),
        }
    }
}

impl Owner {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = Owner::hash_password("hunter2!").unwrap();
        let owner = Owner {
            id: None,
            email: "a@b.com".into(),
            username: "maria_lopez".into(),
            hash_pass: hash,
            name: "Maria".into(),
            phone: "1234567890".into(),
        };

        assert!(owner.verify_password("hunter2!").unwrap());
        assert!(!owner.verify_password("wrong").unwrap());
    }

    #[test]
    fn malformed_hash_fails_closed() {
        let owner = Owner {
            id: None,
            email: "a@b.com".into(),
            username: "maria_lopez".into(),
            hash_pass: "not-a-phc-string".into(),
            name: "Maria".into(),
            phone: "1234567890".into(),
        };

        assert!(owner.verify_password("anything").is_err());
    }

    #[test]
    fn hash_is_never_serialized() {
        let owner = Owner {
            id: None,
            email: "a@b.com".into(),
            username: "maria_lopez".into(),
            hash_pass: "$argon2id$secret".into(),
            name: "Maria".into(),
            phone: "1234567890".into(),
        };

        let json = serde_json::to_string(&owner).unwrap();
        assert!(!json.contains("hash_pass"));
        assert!(!json.contains("argon2id"));
    }
}
