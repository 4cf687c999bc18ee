//! Browser-facing endpoints: the checkout form post, notification pages, and the
//! JSON acknowledgement used by the notification bell.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::{
    dto::orders::CheckoutRequest,
    error::AppError,
    middleware::auth::AuthUser,
    render,
    response::AckResponse,
    routes::params::{CheckoutPageQuery, OrderSuccessQuery},
    services::{notification_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/place-order", post(place_order).fallback(reject_place_order))
        .route(
            "/mark-notifications-read",
            post(mark_notifications_read).fallback(reject_mark_read),
        )
        .route("/notifications", get(notifications_page))
        .route("/orders", get(orders_page))
        .route("/checkout", get(checkout_page))
        .route("/order-success", get(order_success_page))
}

/// Redirect target after a failed checkout, with the message as `error` query param.
pub fn checkout_error_location(err: &AppError) -> String {
    match serde_urlencoded::to_string([("error", err.public_message())]) {
        Ok(query) => format!("/checkout?{query}"),
        Err(_) => "/checkout".to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/place-order",
    request_body(content = CheckoutRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /order-success?order_id=.. or /checkout?error=.."),
        (status = 401, description = "Not logged in or not a POST")
    ),
    security(("bearer_auth" = [])),
    tag = "Web"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<CheckoutRequest>,
) -> Redirect {
    match order_service::place_order(&state, &user, form).await {
        Ok(order_id) => Redirect::to(&format!("/order-success?order_id={order_id}")),
        Err(err) => Redirect::to(&checkout_error_location(&err)),
    }
}

#[utoipa::path(
    post,
    path = "/mark-notifications-read",
    responses(
        (status = 200, description = "All notifications marked read", body = AckResponse),
        (status = 401, description = "Not logged in or not a POST", body = AckResponse),
        (status = 500, description = "Storage failure", body = AckResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Web"
)]
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    user: Result<AuthUser, AppError>,
) -> (StatusCode, Json<AckResponse>) {
    let Ok(user) = user else {
        return unauthorized_ack();
    };

    match notification_service::mark_all_read(&state.pool, &user).await {
        Ok(_) => (StatusCode::OK, Json(AckResponse::ok())),
        Err(err) => {
            tracing::error!(error = ?err, user_id = %user.user_id, "failed to mark notifications read");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AckResponse::failed("Database error.")),
            )
        }
    }
}

async fn reject_place_order() -> AppError {
    AppError::Unauthorized
}

async fn reject_mark_read() -> (StatusCode, Json<AckResponse>) {
    unauthorized_ack()
}

fn unauthorized_ack() -> (StatusCode, Json<AckResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(AckResponse::failed("Unauthorized")),
    )
}

pub async fn notifications_page(
    State(state): State<AppState>,
    user: Result<AuthUser, AppError>,
) -> Response {
    match user {
        Ok(user) => {
            let items = notification_service::list_notifications(&state.pool, &user).await;
            Html(render::notifications_page(&items)).into_response()
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Html(render::login_prompt_page("My Notifications")),
        )
            .into_response(),
    }
}

pub async fn orders_page(
    State(state): State<AppState>,
    user: Result<AuthUser, AppError>,
) -> Response {
    let Ok(user) = user else {
        return (
            StatusCode::UNAUTHORIZED,
            Html(render::login_prompt_page("My Orders")),
        )
            .into_response();
    };

    match order_service::orders_for_user(&state, &user).await {
        Ok(orders) => Html(render::orders_page(&orders)).into_response(),
        Err(err) => {
            if err.is_storage_failure() {
                tracing::error!(error = ?err, user_id = %user.user_id, "failed to load order history");
            }
            (
                err.status_code(),
                Html(render::error_page("My Orders", &err.public_message())),
            )
                .into_response()
        }
    }
}

pub async fn checkout_page(Query(query): Query<CheckoutPageQuery>) -> Html<String> {
    Html(render::checkout_page(query.error.as_deref()))
}

pub async fn order_success_page(Query(query): Query<OrderSuccessQuery>) -> Html<String> {
    Html(render::order_success_page(query.order_id))
}
