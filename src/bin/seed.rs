use shop_orders_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    let user_id = ensure_user(&pool, "user@example.com", "user123").await?;
    let product_ids = seed_products(&pool).await?;
    fill_cart(&pool, user_id, &product_ids).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<Vec<Uuid>> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 5500, 50),
        ("Ferris Mug", "Coffee tastes better with Ferris", 1200, 100),
        ("Rust Sticker Pack", "Decorate your laptop", 500, 200),
        ("E-book: Async Rust", "Learn async Rust patterns", 2500, 75),
    ];

    let mut ids = Vec::with_capacity(products.len());
    for (name, desc, price, stock) in products {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO products (id, name, description, price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO UPDATE SET stock_quantity = EXCLUDED.stock_quantity
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price as i64)
        .bind(stock)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }

    println!("Seeded {} products", ids.len());
    Ok(ids)
}

async fn fill_cart(pool: &sqlx::PgPool, user_id: Uuid, product_ids: &[Uuid]) -> anyhow::Result<()> {
    for (product_id, quantity) in product_ids.iter().take(2).zip([1_i32, 2]) {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    println!("Filled cart for {user_id}");
    Ok(())
}
