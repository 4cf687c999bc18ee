mod common;

use axum::extract::State;
use shop_orders_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_database_down() {
    let response = health_check(State(common::unreachable_state())).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "degraded");
    assert_eq!(data.database, "down");
}

#[tokio::test]
async fn health_check_reports_ok_with_database() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let data = health_check(State(state)).await.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "up");
    Ok(())
}
