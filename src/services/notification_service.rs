use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::notifications::NotificationList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Notification,
    response::{ApiResponse, Meta},
};

pub fn order_placed_message(order_id: Uuid) -> String {
    format!("Your order #{order_id} has been placed and is now being shipped!")
}

/// All notifications for the user, newest first.
///
/// Best-effort read: a failed query is logged and yields an empty list rather than an
/// error.
pub async fn list_notifications(pool: &DbPool, user: &AuthUser) -> Vec<Notification> {
    let result = sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, user_id, order_id, message, is_read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(pool)
    .await;

    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::error!(error = %err, user_id = %user.user_id, "failed to load notifications");
            Vec::new()
        }
    }
}

pub async fn notification_list(
    pool: &DbPool,
    user: &AuthUser,
) -> ApiResponse<NotificationList> {
    let items = list_notifications(pool, user).await;
    let meta = Meta::whole(items.len());
    ApiResponse::success("OK", NotificationList::new(items), Some(meta))
}

/// Flips every unread notification of the user to read and returns how many changed.
/// Running it with nothing unread is a successful no-op.
pub async fn mark_all_read(pool: &DbPool, user: &AuthUser) -> AppResult<u64> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user.user_id)
    .execute(pool)
    .await?;

    tracing::debug!(
        user_id = %user.user_id,
        updated = result.rows_affected(),
        "notifications marked read"
    );
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_message_embeds_order_id() {
        let order_id = Uuid::new_v4();
        let message = order_placed_message(order_id);
        assert!(message.contains(&format!("#{order_id}")));
        assert!(message.ends_with("is now being shipped!"));
    }
}
