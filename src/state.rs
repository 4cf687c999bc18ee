use std::sync::Arc;

use crate::db::{DbPool, OrmConn, orm_from_pool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt_secret: Arc<str>,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, jwt_secret: impl Into<Arc<str>>) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 24,
        }
    }

    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }
}
