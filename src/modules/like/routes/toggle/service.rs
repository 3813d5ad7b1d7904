use super::types::{request, response};
use crate::{
    modules::{
        auth::middleware::Auth,
        like::service::{LikeError, LikeService},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(
    ctx: Arc<Context>,
    payload: request::Payload,
    auth: Auth,
) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    LikeService::new(ctx.likes.clone())
        .toggle(payload.article_id, auth.identity.user_id.as_str())
        .await
        .map(|outcome| response::Success::Toggled(outcome.state()))
        .map_err(|err| match err {
            LikeError::EmptyUserId | LikeError::NilArticleId => response::Error::InvalidId,
            LikeError::Storage(_) => response::Error::FailedToToggleLike,
        })
}
