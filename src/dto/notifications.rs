use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Notification;

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationList {
    pub items: Vec<Notification>,
    pub unread: usize,
}

impl NotificationList {
    pub fn new(items: Vec<Notification>) -> Self {
        let unread = items.iter().filter(|n| !n.is_read).count();
        Self { items, unread }
    }
}
