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
        Purged(bool),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Purged(deleted) => {
                    let message = if deleted {
                        "Likes deleted"
                    } else {
                        "No likes to delete"
                    };
                    (
                        StatusCode::OK,
                        Json(json!({ "message": message, "deleted": deleted })),
                    )
                        .into_response()
                }
            }
        }
    }

    pub enum Error {
        InvalidId,
        FailedToDeleteLikes,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid article id" })),
                )
                    .into_response(),
                Self::FailedToDeleteLikes => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete likes" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
