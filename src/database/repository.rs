use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{User, UserRequest};
use crate::utils::UserError;

/// Data access for the user collection. Each method is one database round trip.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, UserError>;

    /// Natural collection order, unbounded.
    async fn find_all(&self) -> Result<Vec<User>, UserError>;

    async fn insert(&self, user: &User) -> Result<(), UserError>;

    /// Overwrites name, location and title. Returns the matched count.
    async fn replace_fields(&self, id: ObjectId, fields: &UserRequest) -> Result<u64, UserError>;

    /// Returns the deleted count.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, UserError>;

    async fn ping(&self) -> Result<(), UserError>;
}
