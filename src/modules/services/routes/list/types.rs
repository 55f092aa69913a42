pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Default, Validate)]
    pub struct Filters {
        #[validate(required, length(min = 1))]
        pub category: Option<String>,
        #[validate(required, length(min = 1))]
        pub language: Option<String>,
        pub limit: Option<String>,
    }

    pub struct Payload {
        pub category: String,
        pub language: String,
    }

    impl Filters {
        /// Only meaningful once [`Validate::validate`] has passed.
        pub fn into_payload(self) -> Option<Payload> {
            Some(Payload {
                category: self.category?,
                language: self.language?,
            })
        }
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::modules::listing::service::MergedListing;

    pub enum Success {
        Services(Vec<MergedListing>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Services(services) => (StatusCode::OK, Json(json!(services))).into_response(),
            }
        }
    }

    pub enum Error {
        MissingParameters,
        FailedToFetchServices,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingParameters => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "category and language are required" })),
                )
                    .into_response(),
                Self::FailedToFetchServices => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
