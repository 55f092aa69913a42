use axum::{routing::get, Router};

use super::{experiences, hotels, search, services};
use crate::types::Context;
use std::sync::Arc;

async fn health_check() -> &'static str {
    "Server is running"
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health_check))
        .nest("/hotels", hotels::get_router())
        .nest("/experiences", experiences::get_router())
        .nest("/services", services::get_router())
        .nest("/search", search::get_router())
}
