mod count;
mod delete_for_article;
mod delete_for_user;
mod state;
mod toggle;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(toggle::get_router())
        .merge(count::get_router())
        .merge(state::get_router())
        .merge(delete_for_article::get_router())
        .merge(delete_for_user::get_router())
}
