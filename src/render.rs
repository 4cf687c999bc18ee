//! Server-rendered pages for the browser checkout flow.

use uuid::Uuid;

use crate::models::{Notification, Order};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Where a notification links to: the order's anchor on the order history page.
pub fn order_anchor(order_id: Uuid) -> String {
    format!("/orders#order-{order_id}")
}

pub fn notifications_page(notifications: &[Notification]) -> String {
    let mut body = String::from("<h1>My Notifications</h1>\n");

    if notifications.is_empty() {
        body.push_str("<p class=\"empty\">You have no notifications yet.</p>\n");
        return layout("My Notifications", &body);
    }

    body.push_str("<ul class=\"notifications\">\n");
    for notification in notifications {
        let class = if notification.is_read {
            "notification"
        } else {
            "notification unread"
        };
        body.push_str(&format!(
            "<li class=\"{class}\"><a href=\"{href}\"><p>{message}</p><time datetime=\"{iso}\">{display}</time></a>{dot}</li>\n",
            href = order_anchor(notification.order_id),
            message = escape_html(&notification.message),
            iso = notification.created_at.to_rfc3339(),
            display = notification.created_at.format("%B %-d, %Y, %-I:%M %P"),
            dot = if notification.is_read {
                ""
            } else {
                "<span class=\"dot\" title=\"Unread\"></span>"
            },
        ));
    }
    body.push_str("</ul>\n");

    layout("My Notifications", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\" role=\"alert\">{}</p>\n",
        escape_html(title),
        escape_html(message)
    );
    layout(title, &body)
}

pub fn login_prompt_page(title: &str) -> String {
    layout(title, "<p class=\"login\">Please log in to continue.</p>\n")
}

/// Order history; each order carries the `order-<id>` anchor notifications link to.
pub fn orders_page(orders: &[Order]) -> String {
    let mut body = String::from("<h1>My Orders</h1>\n");
    if orders.is_empty() {
        body.push_str("<p class=\"empty\">You have not placed any orders yet.</p>\n");
        return layout("My Orders", &body);
    }

    body.push_str("<ul class=\"orders\">\n");
    for order in orders {
        body.push_str(&format!(
            "<li id=\"order-{id}\"><h2>Order #{id}</h2><p>{status} · {total}</p><p>{address}</p><time datetime=\"{iso}\">{display}</time></li>\n",
            id = order.id,
            status = escape_html(&order.order_status),
            total = format_amount(order.total_amount),
            address = escape_html(&order.shipping_address),
            iso = order.created_at.to_rfc3339(),
            display = order.created_at.format("%B %-d, %Y"),
        ));
    }
    body.push_str("</ul>\n");
    layout("My Orders", &body)
}

/// Amounts are stored in minor units.
pub fn format_amount(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

pub fn checkout_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Checkout</h1>\n");
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        body.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            escape_html(error)
        ));
    }
    body.push_str(
        "<form method=\"post\" action=\"/place-order\">\n\
         <label>Address <input name=\"address\" required></label>\n\
         <label>City <input name=\"city\"></label>\n\
         <label>Zip code <input name=\"zip_code\"></label>\n\
         <label>Phone number <input name=\"phone_number\" required></label>\n\
         <button type=\"submit\">Place order</button>\n\
         </form>\n",
    );
    layout("Checkout", &body)
}

pub fn order_success_page(order_id: Uuid) -> String {
    let body = format!(
        "<h1>Thank you!</h1>\n<p>Your order #{order_id} has been placed.</p>\n\
         <p><a href=\"{}\">View order</a> · <a href=\"/notifications\">Notifications</a></p>\n",
        order_anchor(order_id)
    );
    layout("Order placed", &body)
}
