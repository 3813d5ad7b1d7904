pub mod request {
    use uuid::Uuid;

    pub struct Payload {
        pub article_id: Uuid,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::modules::like::service::LikeState;

    pub enum Success {
        State(LikeState),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::State(state) => {
                    (StatusCode::OK, Json(json!({ "state": state.as_str() }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        InvalidId,
        FailedToFetchState,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid article or user id" })),
                )
                    .into_response(),
                Self::FailedToFetchState => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch like state" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
