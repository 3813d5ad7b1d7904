pub mod request {
    use std::borrow::Cow;

    use serde::Deserialize;
    use uuid::Uuid;
    use validator::{Validate, ValidationError};

    fn validate_article_id(article_id: &Uuid) -> Result<(), ValidationError> {
        if article_id.is_nil() {
            return Err(ValidationError::new("NIL_ARTICLE_ID")
                .with_message(Cow::from("Article id must not be the nil UUID")));
        }
        Ok(())
    }

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(custom(code = "NIL_ARTICLE_ID", function = "validate_article_id"))]
        pub article_id: Uuid,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    use crate::{modules::like::service::LikeState, utils};

    pub enum Success {
        Toggled(LikeState),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Toggled(state) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Like toggled",
                        "state": state.as_str(),
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidId,
        FailedToToggleLike,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::InvalidId => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid article or user id" })),
                )
                    .into_response(),
                Self::FailedToToggleLike => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to toggle like" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
