use super::repository::{self, Collection, Listing, ListingStore, Translation};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{hash_map::Entry, HashMap};

/// A listing with its text resolved for the requested language.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MergedListing {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MergedListing {
    fn new(listing: Listing, translation: Option<&Translation>) -> Self {
        let (title, description) = match translation {
            Some(translation) => (translation.title.clone(), translation.description.clone()),
            None => (listing.title, listing.description),
        };

        Self {
            id: listing.id,
            title,
            description,
            fields: listing.fields,
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

pub struct ListingQuery<'a> {
    pub collection: Collection,
    pub filter_value: &'a str,
    /// `None` when the requested language has no translations.
    pub language: Option<&'a str>,
    pub limit: Option<i64>,
    pub shuffle: bool,
}

pub async fn fetch_localized_listings(
    store: &dyn ListingStore,
    query: ListingQuery<'_>,
) -> Result<Vec<MergedListing>, repository::Error> {
    let listings = store
        .find_listings(&query.collection, query.filter_value, query.limit)
        .await?;

    let translations = match query.language {
        Some(language) if !listings.is_empty() => {
            let listing_ids = listings
                .iter()
                .map(|listing| listing.id.clone())
                .collect::<Vec<_>>();

            store
                .find_translations(&query.collection, language, &listing_ids)
                .await?
        }
        _ => vec![],
    };

    tracing::debug!(
        "Merging {} {} with {} translations",
        listings.len(),
        query.collection.listings,
        translations.len()
    );

    let mut merged = merge(listings, translations);

    if query.shuffle {
        shuffle(&mut merged, &mut rand::thread_rng());
    }

    Ok(merged)
}

/// Overlays each listing with its translation, keeping the listings' order.
pub fn merge(listings: Vec<Listing>, translations: Vec<Translation>) -> Vec<MergedListing> {
    let mut by_listing: HashMap<String, Translation> = HashMap::new();

    for translation in translations {
        match by_listing.entry(translation.listing_id.clone()) {
            Entry::Occupied(mut current) => {
                if translation.supersedes(current.get()) {
                    current.insert(translation);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(translation);
            }
        }
    }

    listings
        .into_iter()
        .map(|listing| {
            let translation = by_listing.get(&listing.id);
            MergedListing::new(listing, translation)
        })
        .collect()
}

/// Uniform in-place permutation (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::listing::{
        memory::{self, MemoryListingStore},
        repository::{HOTELS, SERVICES},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn ids(listings: &[MergedListing]) -> Vec<&str> {
        listings.iter().map(|listing| listing.id.as_str()).collect()
    }

    #[test]
    fn untranslated_listing_keeps_defaults() {
        let listing = memory::listing("h1", "division", "Dhaka");

        let merged = merge(vec![listing.clone()], vec![]);

        assert_eq!(merged[0].title, listing.title);
        assert_eq!(merged[0].description, listing.description);
        assert_eq!(merged[0].field("division"), Some("Dhaka"));
    }

    #[test]
    fn translation_overrides_title_and_description() {
        let listing = memory::listing("h1", "division", "Dhaka");
        let translation = memory::translation("t1", "h1", "bn", 0);

        let merged = merge(vec![listing], vec![translation.clone()]);

        assert_eq!(merged[0].title, translation.title);
        assert_eq!(merged[0].description, translation.description);
    }

    #[test]
    fn translations_for_other_listings_are_ignored() {
        let merged = merge(
            vec![
                memory::listing("h1", "division", "Dhaka"),
                memory::listing("h2", "division", "Dhaka"),
            ],
            vec![memory::translation("t1", "h2", "en", 0)],
        );

        assert_eq!(merged[0].title, "h1 title");
        assert_eq!(merged[1].title, "t1 title");
    }

    #[test]
    fn most_recent_translation_wins_regardless_of_order() {
        let listing = memory::listing("h1", "division", "Dhaka");
        let older = memory::translation("t1", "h1", "en", 1);
        let newer = memory::translation("t2", "h1", "en", 5);

        let forward = merge(vec![listing.clone()], vec![older.clone(), newer.clone()]);
        let backward = merge(vec![listing], vec![newer, older]);

        assert_eq!(forward[0].title, "t2 title");
        assert_eq!(backward[0].title, "t2 title");
    }

    #[test]
    fn merge_keeps_listing_order() {
        let merged = merge(
            vec![
                memory::listing("c", "category", "Cleaning"),
                memory::listing("a", "category", "Cleaning"),
                memory::listing("b", "category", "Cleaning"),
            ],
            vec![],
        );

        assert_eq!(ids(&merged), vec!["c", "a", "b"]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);

        for size in [0usize, 1, 2, 5, 32] {
            let original = (0..size).collect::<Vec<_>>();
            let mut shuffled = original.clone();

            shuffle(&mut shuffled, &mut rng);

            assert_eq!(shuffled.len(), size);
            let mut sorted = shuffled.clone();
            sorted.sort();
            assert_eq!(sorted, original);
        }
    }

    #[test]
    fn shuffle_reaches_every_position() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_first = [false; 4];

        for _ in 0..200 {
            let mut items = [0, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            seen_first[items[0]] = true;
        }

        assert!(seen_first.iter().all(|seen| *seen));
    }

    #[tokio::test]
    async fn fetch_applies_limit_and_language() {
        let store = MemoryListingStore::default();
        for i in 0..10 {
            store.insert_listing(HOTELS, memory::listing(&format!("h{i}"), "division", "Dhaka"));
        }
        store.insert_listing(HOTELS, memory::listing("x", "division", "Sylhet"));
        store.insert_translation(HOTELS, memory::translation("t0", "h0", "bn", 0));
        store.insert_translation(HOTELS, memory::translation("t1", "h1", "en", 0));

        let merged = fetch_localized_listings(
            &store,
            ListingQuery {
                collection: HOTELS,
                filter_value: "Dhaka",
                language: Some("bn"),
                limit: Some(8),
                shuffle: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            ids(&merged),
            vec!["h0", "h1", "h2", "h3", "h4", "h5", "h6", "h7"]
        );
        assert_eq!(merged[0].title, "t0 title");
        assert_eq!(merged[1].title, "h1 title");
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn unsupported_language_skips_translation_query() {
        let store = MemoryListingStore::default();
        store.insert_listing(SERVICES, memory::listing("s1", "category", "Cleaning"));
        store.insert_translation(SERVICES, memory::translation("t1", "s1", "en", 0));

        let merged = fetch_localized_listings(
            &store,
            ListingQuery {
                collection: SERVICES,
                filter_value: "Cleaning",
                language: None,
                limit: None,
                shuffle: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(merged[0].title, "s1 title");
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn empty_result_skips_translation_query() {
        let store = MemoryListingStore::default();

        let merged = fetch_localized_listings(
            &store,
            ListingQuery {
                collection: SERVICES,
                filter_value: "Cleaning",
                language: Some("en"),
                limit: None,
                shuffle: true,
            },
        )
        .await
        .unwrap();

        assert!(merged.is_empty());
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let store = MemoryListingStore::default();
        store.insert_listing(HOTELS, memory::listing("h1", "division", "Dhaka"));
        store.fail();

        let result = fetch_localized_listings(
            &store,
            ListingQuery {
                collection: HOTELS,
                filter_value: "Dhaka",
                language: Some("en"),
                limit: Some(8),
                shuffle: false,
            },
        )
        .await;

        assert!(matches!(result, Err(repository::Error::UnexpectedError)));
    }
}
