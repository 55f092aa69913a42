use super::repository::{Collection, Error, Listing, ListingStore, Translation};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

/// In-memory [`ListingStore`] that records how many queries it served. Either
/// every query or only the translation lookup can be made to fail.
#[derive(Default)]
pub struct MemoryListingStore {
    listings: Mutex<HashMap<&'static str, Vec<Listing>>>,
    translations: Mutex<HashMap<&'static str, Vec<Translation>>>,
    queries: AtomicUsize,
    failing: AtomicBool,
    failing_translations: AtomicBool,
}

impl MemoryListingStore {
    pub fn insert_listing(&self, collection: Collection, listing: Listing) {
        self.listings
            .lock()
            .unwrap()
            .entry(collection.listings)
            .or_default()
            .push(listing);
    }

    pub fn insert_translation(&self, collection: Collection, translation: Translation) {
        self.translations
            .lock()
            .unwrap()
            .entry(collection.translations)
            .or_default()
            .push(translation);
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn fail_translations(&self) {
        self.failing_translations.store(true, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record_query(&self) -> Result<(), Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::UnexpectedError);
        }

        Ok(())
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn find_listings(
        &self,
        collection: &Collection,
        filter_value: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Listing>, Error> {
        self.record_query()?;

        let limit = limit.map_or(usize::MAX, |limit| limit.max(0) as usize);

        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(collection.listings)
            .map(|listings| {
                listings
                    .iter()
                    .filter(|listing| listing.field(collection.filter_field) == Some(filter_value))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_translations(
        &self,
        collection: &Collection,
        language: &str,
        listing_ids: &[String],
    ) -> Result<Vec<Translation>, Error> {
        self.record_query()?;

        if self.failing_translations.load(Ordering::SeqCst) {
            return Err(Error::UnexpectedError);
        }

        Ok(self
            .translations
            .lock()
            .unwrap()
            .get(collection.translations)
            .map(|translations| {
                translations
                    .iter()
                    .filter(|translation| {
                        translation.language == language
                            && listing_ids.contains(&translation.listing_id)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn listing(id: &str, filter_field: &str, filter_value: &str) -> Listing {
    let mut fields = Map::new();
    fields.insert(
        filter_field.to_string(),
        Value::String(filter_value.to_string()),
    );
    fields.insert("rating".to_string(), Value::from(4.5));

    Listing::new(
        id.to_string(),
        format!("{id} title"),
        format!("{id} description"),
        fields,
    )
}

/// Translation for `listing_id` last revised `hour` hours into the fixture day.
pub fn translation(id: &str, listing_id: &str, language: &str, hour: u32) -> Translation {
    Translation {
        id: id.to_string(),
        listing_id: listing_id.to_string(),
        language: language.to_string(),
        title: format!("{id} title"),
        description: format!("{id} description"),
        created_at: fixture_time(0),
        updated_at: Some(fixture_time(hour)),
    }
}

fn fixture_time(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap()
}
