use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartItemDto, CartList},
        notifications::NotificationList,
        orders::{CheckoutRequest, OrderList, OrderWithItems},
    },
    models::{CartItem, Notification, Order, OrderItem, Product, User},
    response::{AckResponse, ApiResponse, Meta},
    routes::{auth, cart, health, notifications, orders, params, web},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        orders::list_order,
        orders::checkout,
        orders::get_order,
        notifications::list_notifications,
        web::place_order,
        web::mark_notifications_read
    ),
    components(
        schemas(
            User,
            Product,
            CartItem,
            Order,
            OrderItem,
            Notification,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            CartItemDto,
            CartList,
            CheckoutRequest,
            OrderList,
            OrderWithItems,
            NotificationList,
            AckResponse,
            params::Pagination,
            params::OrderListQuery,
            Meta,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<NotificationList>,
            ApiResponse<CartList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Notifications", description = "Notification endpoints"),
        (name = "Web", description = "Browser checkout and notification endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_and_notification_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/orders/checkout",
            "/api/notifications",
            "/place-order",
            "/mark-notifications-read",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
