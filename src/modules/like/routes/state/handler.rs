use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::Auth, types::Context};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(article_id): Path<Uuid>,
    auth: Auth,
) -> impl IntoResponse {
    service(ctx, request::Payload { article_id }, auth).await
}
