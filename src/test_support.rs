//! In-memory collaborators for handler and service tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;
use std::time::Duration;

use crate::database::UserRepository;
use crate::models::{User, UserRequest};
use crate::services::{AdminNotifier, NotificationError, UserAction};
use crate::utils::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl InMemoryUserRepository {
    /// Every call fails with the given driver message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Every call sleeps before answering.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn seed(&self, input: UserRequest) -> User {
        let user = User::new(input);
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    async fn gate(&self) -> Result<(), UserError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(UserError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError> {
        self.gate().await?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.name == name).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, UserError> {
        self.gate().await?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        self.gate().await?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert(&self, user: &User) -> Result<(), UserError> {
        self.gate().await?;
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn replace_fields(&self, id: ObjectId, fields: &UserRequest) -> Result<u64, UserError> {
        self.gate().await?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.name = fields.name.clone();
                user.location = fields.location.clone();
                user.title = fields.title.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, UserError> {
        self.gate().await?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }

    async fn ping(&self) -> Result<(), UserError> {
        self.gate().await
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, UserAction)>>,
    fail: bool,
    hang: bool,
}

impl RecordingNotifier {
    /// Records the attempt, then reports a transport failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Records the attempt, then never completes, like a stalled SMTP session.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, UserAction)> {
        self.sent.lock().unwrap().clone()
    }

    /// Yields until `count` notifications were attempted; background sends
    /// run on their own task.
    pub async fn wait_for(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.sent.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("notification was not attempted");
    }
}

#[async_trait]
impl AdminNotifier for RecordingNotifier {
    async fn notify(&self, name: &str, action: UserAction) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push((name.to_string(), action));
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(NotificationError::Timeout);
        }
        Ok(())
    }
}
