use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::notifications::NotificationList,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::notification_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_notifications))
}

/// Newest first. An unreadable store yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notification history of the current user", body = ApiResponse<NotificationList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<ApiResponse<NotificationList>> {
    Json(notification_service::notification_list(&state.pool, &user).await)
}
