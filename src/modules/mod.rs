pub mod auth;
pub mod health;
pub mod like;

use crate::types::Context;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health::health_check))
        .nest("/likes", like::routes::get_router())
}
