use super::types::{request, response};
use crate::{
    modules::{
        auth::middleware::Auth,
        like::service::{LikeError, LikeService},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(
    ctx: Arc<Context>,
    payload: request::Payload,
    auth: Auth,
) -> response::Response {
    LikeService::new(ctx.likes.clone())
        .state_for(payload.article_id, auth.identity.user_id.as_str())
        .await
        .map(response::Success::State)
        .map_err(|err| match err {
            LikeError::EmptyUserId | LikeError::NilArticleId => response::Error::InvalidId,
            LikeError::Storage(_) => response::Error::FailedToFetchState,
        })
}
