use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems, ShippingDetails},
    entity::{
        cart_items::{self, Column as CartCol, Entity as CartItems},
        notifications::ActiveModel as NotificationActive,
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::notification_service::order_placed_message,
    state::AppState,
};

/// Status written on every new order. Checkout has no pending stage; orders are
/// considered shipped as soon as they are placed.
pub const PLACED_ORDER_STATUS: &str = "Shipped";

/// A cart line joined to its product's current price and stock, read under row lock.
#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub stock_quantity: i32,
}

/// Converts the caller's cart into an order in one transaction.
///
/// Cart and product rows are locked `FOR UPDATE` until commit, so concurrent
/// checkouts touching the same rows serialize. Any failure rolls the whole unit back
/// and the originating error is returned unchanged.
pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<Uuid> {
    let shipping = payload.into_shipping()?;

    match run_checkout(state, user.user_id, &shipping).await {
        Ok(order_id) => {
            tracing::info!(%order_id, user_id = %user.user_id, "order placed");
            Ok(order_id)
        }
        Err(err) => {
            if err.is_business_rule() {
                tracing::info!(error = %err, user_id = %user.user_id, "checkout rejected");
            } else {
                tracing::error!(error = ?err, user_id = %user.user_id, "checkout failed");
            }
            Err(err)
        }
    }
}

/// Begin, run, and commit or roll back. Every failure, including begin and commit,
/// comes back as the returned error.
async fn run_checkout(
    state: &AppState,
    user_id: Uuid,
    shipping: &ShippingDetails,
) -> AppResult<Uuid> {
    let txn = state.orm.begin().await?;

    let outcome = place_order_in(&txn, user_id, shipping).await;
    match outcome {
        Ok(order_id) => {
            txn.commit().await?;
            Ok(order_id)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::warn!(error = %rollback_err, "checkout rollback failed");
            }
            Err(err)
        }
    }
}

async fn place_order_in(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    shipping: &ShippingDetails,
) -> AppResult<Uuid> {
    let lines = lock_cart_lines(txn, user_id).await?;
    let total_amount = checked_total(&lines)?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        total_amount: Set(total_amount),
        shipping_address: Set(shipping.shipping_address.clone()),
        phone_number: Set(shipping.phone_number.clone()),
        order_status: Set(PLACED_ORDER_STATUS.to_string()),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;

    for line in &lines {
        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price_per_item: Set(line.price),
            created_at: NotSet,
        }
        .insert(txn)
        .await?;

        let updated = Products::update_many()
            .col_expr(
                ProdCol::StockQuantity,
                Expr::col(ProdCol::StockQuantity).sub(line.quantity),
            )
            .filter(ProdCol::Id.eq(line.product_id))
            .filter(ProdCol::StockQuantity.gte(line.quantity))
            .exec(txn)
            .await?;
        if updated.rows_affected != 1 {
            return Err(AppError::InsufficientStock {
                product_id: line.product_id,
            });
        }
    }

    CartItems::delete_many()
        .filter(CartCol::UserId.eq(user_id))
        .exec(txn)
        .await?;

    NotificationActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        order_id: Set(order.id),
        message: Set(order_placed_message(order.id)),
        is_read: Set(false),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;

    Ok(order.id)
}

/// Reads the user's cart joined to products, holding row locks on both.
/// Rows come back in product order so competing checkouts acquire locks in the same order.
async fn lock_cart_lines(txn: &DatabaseTransaction, user_id: Uuid) -> AppResult<Vec<CartLine>> {
    let lines = CartItems::find()
        .select_only()
        .column(CartCol::ProductId)
        .column(CartCol::Quantity)
        .column(ProdCol::Price)
        .column(ProdCol::StockQuantity)
        .join(JoinType::InnerJoin, cart_items::Relation::Products.def())
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::ProductId)
        .lock(LockType::Update)
        .into_model::<CartLine>()
        .all(txn)
        .await?;
    Ok(lines)
}

/// Validates every line against current stock before anything is written and returns
/// the order total.
pub(crate) fn checked_total(lines: &[CartLine]) -> AppResult<i64> {
    if lines.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let mut total_amount: i64 = 0;
    for line in lines {
        if line.quantity <= 0 {
            return Err(AppError::BadRequest("Cart has invalid quantity".into()));
        }
        if line.quantity > line.stock_quantity {
            return Err(AppError::InsufficientStock {
                product_id: line.product_id,
            });
        }
        total_amount = line
            .price
            .checked_mul(i64::from(line.quantity))
            .and_then(|subtotal| total_amount.checked_add(subtotal))
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
    }
    Ok(total_amount)
}

/// Places the order and reads it back with its items.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order_id = place_order(state, user, payload).await?;
    let placed = find_order_with_items(state, user, order_id).await?;

    Ok(ApiResponse::success(
        "Checkout success",
        placed,
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::OrderStatus.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Full order history for the user, newest first.
pub async fn orders_for_user(state: &AppState, user: &AuthUser) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(orders)
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = find_order_with_items(state, user, id).await?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

async fn find_order_with_items(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<OrderWithItems> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::ProductId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(OrderWithItems {
        order: order_from_entity(order),
        items,
    })
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        total_amount: model.total_amount,
        shipping_address: model.shipping_address,
        phone_number: model.phone_number,
        order_status: model.order_status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price_per_item: model.price_per_item,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: i64, stock_quantity: i32) -> CartLine {
        CartLine {
            product_id: Uuid::new_v4(),
            quantity,
            price,
            stock_quantity,
        }
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let lines = vec![line(2, 10, 5), line(1, 250, 1), line(3, 7, 30)];
        assert_eq!(checked_total(&lines).unwrap(), 2 * 10 + 250 + 3 * 7);
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(checked_total(&[]), Err(AppError::EmptyCart)));
    }

    #[test]
    fn one_short_line_rejects_the_whole_cart() {
        let short = line(6, 10, 5);
        let short_id = short.product_id;
        let lines = vec![line(1, 10, 100), short, line(1, 10, 100)];

        match checked_total(&lines) {
            Err(AppError::InsufficientStock { product_id }) => assert_eq!(product_id, short_id),
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn quantity_equal_to_stock_is_allowed() {
        assert_eq!(checked_total(&[line(5, 3, 5)]).unwrap(), 15);
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(matches!(
            checked_total(&[line(0, 10, 5)]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert!(matches!(
            checked_total(&[line(2, i64::MAX, 5)]),
            Err(AppError::BadRequest(_))
        ));
    }
}
