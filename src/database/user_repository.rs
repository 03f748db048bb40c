use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

use super::{UserRepository, USERS_COLLECTION};
use crate::models::{User, UserRequest};
use crate::utils::UserError;

pub struct MongoUserRepository {
    db: Database,
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, UserError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn insert(&self, user: &User) -> Result<(), UserError> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn replace_fields(&self, id: ObjectId, fields: &UserRequest) -> Result<u64, UserError> {
        let update = doc! {
            "$set": {
                "name": fields.name.as_str(),
                "location": fields.location.as_str(),
                "title": fields.title.as_str(),
            }
        };
        let result = self.collection.update_one(doc! { "_id": id }, update).await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, UserError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), UserError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
