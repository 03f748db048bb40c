// ==================== USER SERVICE ====================
// Validation, name uniqueness hint, database deadline and admin notifications

use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, timeout_at, Instant};
use validator::Validate;

use crate::database::UserRepository;
use crate::models::{User, UserRequest};
use crate::services::notification_service::{AdminNotifier, NotificationError, UserAction};
use crate::utils::UserError;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    notifier: Arc<dyn AdminNotifier>,
    db_timeout: Duration,
    notify_timeout: Duration,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        notifier: Arc<dyn AdminNotifier>,
        db_timeout: Duration,
        notify_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            notifier,
            db_timeout,
            notify_timeout,
        }
    }

    /// All database round trips of one call share a single deadline.
    fn deadline(&self) -> Instant {
        Instant::now() + self.db_timeout
    }

    async fn within<T, F>(deadline: Instant, op: F) -> Result<T, UserError>
    where
        F: Future<Output = Result<T, UserError>>,
    {
        timeout_at(deadline, op).await.map_err(|_| UserError::Timeout)?
    }

    pub async fn create_user(&self, input: UserRequest) -> Result<User, UserError> {
        validate(&input)?;
        let deadline = self.deadline();

        // Not atomic with the insert: concurrent creates may both pass
        if Self::within(deadline, self.repository.find_by_name(&input.name))
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateName);
        }

        let user = User::new(input);
        Self::within(deadline, self.repository.insert(&user)).await?;

        self.notify_in_background(user.name.clone(), UserAction::Created);

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, UserError> {
        let id = parse_id(id)?;
        Self::within(self.deadline(), self.repository.find_by_id(id))
            .await?
            .ok_or(UserError::NotFound)
    }

    pub async fn update_user(&self, id: &str, input: UserRequest) -> Result<User, UserError> {
        let id = parse_id(id)?;
        validate(&input)?;
        let deadline = self.deadline();

        let matched = Self::within(deadline, self.repository.replace_fields(id, &input)).await?;
        if matched == 0 {
            return Err(UserError::NotFound);
        }

        Self::within(deadline, self.repository.find_by_id(id))
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Deletes the record, then notifies the administrator before returning.
    /// A failed notification is logged; the deletion stands.
    pub async fn delete_user(&self, id: &str) -> Result<User, UserError> {
        let id = parse_id(id)?;
        let deadline = self.deadline();

        let user = Self::within(deadline, self.repository.find_by_id(id))
            .await?
            .ok_or(UserError::NotFound)?;

        let deleted = Self::within(deadline, self.repository.delete_by_id(id)).await?;
        if deleted == 0 {
            return Err(UserError::NotFound);
        }

        if let Err(e) = self.send_notification(&user.name, UserAction::Deleted).await {
            log::error!("❌ Failed to send email to admin (user {} deleted): {}", user.name, e);
        }

        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Self::within(self.deadline(), self.repository.find_all()).await
    }

    pub async fn database_is_up(&self) -> bool {
        Self::within(self.deadline(), self.repository.ping())
            .await
            .is_ok()
    }

    async fn send_notification(&self, name: &str, action: UserAction) -> Result<(), NotificationError> {
        send_bounded(self.notifier.as_ref(), name, action, self.notify_timeout).await
    }

    /// Best-effort, detached from the request: it may outlive the response and
    /// its outcome is only visible in the logs.
    fn notify_in_background(&self, name: String, action: UserAction) {
        let notifier = Arc::clone(&self.notifier);
        let bound = self.notify_timeout;

        tokio::spawn(async move {
            if let Err(e) = send_bounded(notifier.as_ref(), &name, action, bound).await {
                log::error!("❌ Failed to send email to admin (user {} {}): {}", name, action, e);
            }
        });
    }
}

async fn send_bounded(
    notifier: &dyn AdminNotifier,
    name: &str,
    action: UserAction,
    bound: Duration,
) -> Result<(), NotificationError> {
    timeout(bound, notifier.notify(name, action))
        .await
        .map_err(|_| NotificationError::Timeout)?
}

fn validate(input: &UserRequest) -> Result<(), UserError> {
    input
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))
}

fn parse_id(raw: &str) -> Result<ObjectId, UserError> {
    ObjectId::parse_str(raw).map_err(|_| UserError::InvalidId(raw.to_string()))
}
