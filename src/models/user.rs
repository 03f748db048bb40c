use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User record as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Generated once at creation, never reassigned
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl User {
    pub fn new(input: UserRequest) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            location: input.location,
            title: input.title,
        }
    }
}

/// Body of create and update requests. Update replaces all three fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
}

/// JSON shape of a user in responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Hex ObjectId
    pub id: String,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id.to_hex(),
            name: u.name,
            location: u.location,
            title: u.title,
        }
    }
}
