use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    filters: Result<Query<request::Filters>, QueryRejection>,
) -> impl IntoResponse {
    let filters = filters.map(|Query(filters)| filters).unwrap_or_default();

    service(ctx, filters).await
}
