use super::provider::{Identity, Role};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

fn get_token_from_header(header: String) -> Result<String, Error> {
    header
        .split(" ")
        .skip(1)
        .next()
        .map(|h| h.to_string())
        .ok_or(Error::InvalidSession)
}

async fn get_identity_from_request<State: Send + Sync>(
    ctx: Arc<Context>,
    parts: &mut Parts,
    _: &State,
) -> Result<Identity, Response> {
    let headers = parts.extract::<HeaderMap>().await.unwrap();

    let err = (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid session token"})),
    );

    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(err.clone().into_response())?;

    let token = get_token_from_header(auth_header.to_string())
        .map_err(|_| err.clone().into_response())?;

    ctx.identity
        .resolve(token.as_str())
        .await
        .ok_or(err.into_response())
}

#[derive(Clone)]
pub struct Auth {
    pub identity: Identity,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts.extract::<Extension<Arc<Context>>>().await.unwrap();
        get_identity_from_request(ctx, parts, state)
            .await
            .map(|identity| Self { identity })
    }
}

#[derive(Clone)]
pub struct AdminAuth {
    pub identity: Identity,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts.extract::<Extension<Arc<Context>>>().await.unwrap();

        let identity = get_identity_from_request(ctx, parts, state).await?;

        if identity.role != Role::Admin {
            return Err(
                (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response(),
            );
        }

        Ok(Self { identity })
    }
}
