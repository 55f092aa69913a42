use super::types::{request, response};
use crate::{
    modules::listing::{
        repository::Collection,
        service::{fetch_localized_listings, ListingQuery},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, filters: request::Filters) -> response::Response {
    filters.validate().map_err(|errors| {
        tracing::debug!("Rejected listing filters: {errors}");
        response::Error::MissingParameters
    })?;

    let payload = filters
        .into_payload()
        .ok_or(response::Error::MissingParameters)?;

    let Some(collection) = Collection::from_route(&payload.route) else {
        tracing::debug!("Unknown search route {}", payload.route);
        return Ok(response::Success::Result(vec![]));
    };

    fetch_localized_listings(
        ctx.store.as_ref(),
        ListingQuery {
            collection,
            filter_value: &payload.category,
            language: ctx.languages.resolve(&payload.language),
            limit: None,
            shuffle: true,
        },
    )
    .await
    .map_err(|_| response::Error::SearchFailed)
    .map(response::Success::Result)
}
