pub mod request {
    use uuid::Uuid;

    pub struct Payload {
        pub article_id: Uuid,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Count(i64),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Count(likes) => {
                    (StatusCode::OK, Json(json!({ "likes": likes }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        InvalidId,
        FailedToCountLikes,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid article id" })),
                )
                    .into_response(),
                Self::FailedToCountLikes => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to count likes" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
