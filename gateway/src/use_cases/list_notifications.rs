use std::sync::Arc;

use common::domain::Notification;

use crate::domain::error::GatewayError;
use crate::domain::repository::NotificationRepository;

pub struct ListNotificationsUseCase {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl ListNotificationsUseCase {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Notification>, GatewayError> {
        self.notification_repo.list().await
    }
}
