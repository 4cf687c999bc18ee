mod common;

use serial_test::serial;
use shop_orders_api::services::{notification_service, order_service};

use common::{checkout_form, create_product, create_user, put_in_cart, setup_state};

#[tokio::test]
#[serial]
async fn user_without_notifications_gets_empty_list() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state.pool, "quiet@example.com").await?;

    let items = notification_service::list_notifications(&state.pool, &user).await;
    assert!(items.is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
async fn lists_newest_first_and_marks_all_read() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state.pool, "reader@example.com").await?;
    let product = create_product(&state.pool, "Widget", 100, 10).await?;

    put_in_cart(&state.pool, &user, product, 1).await?;
    let first = order_service::place_order(&state, &user, checkout_form()).await?;
    put_in_cart(&state.pool, &user, product, 2).await?;
    let second = order_service::place_order(&state, &user, checkout_form()).await?;

    let items = notification_service::list_notifications(&state.pool, &user).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].order_id, second);
    assert_eq!(items[1].order_id, first);
    assert!(items.iter().all(|n| !n.is_read));

    let updated = notification_service::mark_all_read(&state.pool, &user).await?;
    assert_eq!(updated, 2);

    let items = notification_service::list_notifications(&state.pool, &user).await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|n| n.is_read));

    // second call has nothing left to flip but still succeeds
    let updated = notification_service::mark_all_read(&state.pool, &user).await?;
    assert_eq!(updated, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn mark_read_leaves_other_users_untouched() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let alice = create_user(&state.pool, "alice@example.com").await?;
    let bob = create_user(&state.pool, "bob@example.com").await?;
    let product = create_product(&state.pool, "Gadget", 100, 10).await?;

    put_in_cart(&state.pool, &alice, product, 1).await?;
    order_service::place_order(&state, &alice, checkout_form()).await?;
    put_in_cart(&state.pool, &bob, product, 1).await?;
    order_service::place_order(&state, &bob, checkout_form()).await?;

    notification_service::mark_all_read(&state.pool, &alice).await?;

    let bobs = notification_service::list_notifications(&state.pool, &bob).await;
    assert_eq!(bobs.len(), 1);
    assert!(!bobs[0].is_read);

    let alices = notification_service::list_notifications(&state.pool, &alice).await;
    assert_eq!(alices.len(), 1);
    assert!(alices[0].is_read);

    Ok(())
}

#[tokio::test]
async fn unreachable_store_degrades_to_empty_list() {
    let state = common::unreachable_state();
    let user = shop_orders_api::middleware::auth::AuthUser {
        user_id: uuid::Uuid::new_v4(),
    };

    let items = notification_service::list_notifications(&state.pool, &user).await;
    assert!(items.is_empty());

    let err = notification_service::mark_all_read(&state.pool, &user)
        .await
        .unwrap_err();
    assert!(err.is_storage_failure());
}
