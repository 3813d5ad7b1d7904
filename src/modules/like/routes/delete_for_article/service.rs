use super::types::{request, response};
use crate::{
    modules::like::service::{LikeError, LikeService},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    LikeService::new(ctx.likes.clone())
        .delete_for_article(payload.article_id)
        .await
        .map(response::Success::Purged)
        .map_err(|err| match err {
            LikeError::EmptyUserId | LikeError::NilArticleId => response::Error::InvalidId,
            LikeError::Storage(_) => response::Error::FailedToDeleteLikes,
        })
}
