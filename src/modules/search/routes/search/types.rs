pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Default, Validate)]
    pub struct Filters {
        #[validate(required, length(min = 1))]
        pub route: Option<String>,
        /// Matched against `division` for hotels and experiences.
        #[validate(required, length(min = 1))]
        pub category: Option<String>,
        #[validate(required, length(min = 1))]
        pub language: Option<String>,
    }

    pub struct Payload {
        pub route: String,
        pub category: String,
        pub language: String,
    }

    impl Filters {
        /// Only meaningful once [`Validate::validate`] has passed.
        pub fn into_payload(self) -> Option<Payload> {
            Some(Payload {
                route: self.route?,
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
        Result(Vec<MergedListing>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Result(res) => (StatusCode::OK, Json(json!(res))).into_response(),
            }
        }
    }

    pub enum Error {
        MissingParameters,
        SearchFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingParameters => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "route, category and language are required" })),
                )
                    .into_response(),
                Self::SearchFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
