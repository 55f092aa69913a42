use super::types::{request, response};
use crate::{
    modules::listing::{
        repository::HOTELS,
        service::{fetch_localized_listings, ListingQuery},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

const MAX_HOTELS: i64 = 8;

pub async fn service(ctx: Arc<Context>, filters: request::Filters) -> response::Response {
    filters.validate().map_err(|errors| {
        tracing::debug!("Rejected listing filters: {errors}");
        response::Error::MissingParameters
    })?;

    let payload = filters
        .into_payload()
        .ok_or(response::Error::MissingParameters)?;

    fetch_localized_listings(
        ctx.store.as_ref(),
        ListingQuery {
            collection: HOTELS,
            filter_value: &payload.division,
            language: ctx.languages.resolve(&payload.language),
            limit: Some(MAX_HOTELS),
            shuffle: false,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchHotels)
    .map(response::Success::Hotels)
}
