use super::types::{request, response};
use crate::{
    modules::listing::{
        repository::EXPERIENCES,
        service::{fetch_localized_listings, ListingQuery},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, filters: request::Filters) -> response::Response {
    if let Some(limit) = &filters.limit {
        tracing::debug!("Ignoring limit {} on experiences, every match is returned", limit);
    }

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
            collection: EXPERIENCES,
            filter_value: &payload.division,
            language: ctx.languages.resolve(&payload.language),
            limit: None,
            shuffle: true,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchExperiences)
    .map(response::Success::Experiences)
}
