use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgExecutor, PgPool};

/// Table layout of one resource family: the base table, its translation table
/// and the column base rows are filtered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collection {
    pub listings: &'static str,
    pub translations: &'static str,
    pub filter_field: &'static str,
}

pub const HOTELS: Collection = Collection {
    listings: "hotels",
    translations: "hotel_translations",
    filter_field: "division",
};

pub const EXPERIENCES: Collection = Collection {
    listings: "experiences",
    translations: "experience_translations",
    filter_field: "division",
};

pub const SERVICES: Collection = Collection {
    listings: "services",
    translations: "service_translations",
    filter_field: "category",
};

impl Collection {
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "hotels" => Some(HOTELS),
            "experiences" => Some(EXPERIENCES),
            "services" => Some(SERVICES),
            _ => None,
        }
    }
}

const RESERVED_FIELDS: [&str; 3] = ["id", "title", "description"];

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Filter attribute plus every untyped attribute of the stored document.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Listing {
    pub fn new(
        id: String,
        title: String,
        description: String,
        mut fields: Map<String, Value>,
    ) -> Self {
        for reserved in RESERVED_FIELDS {
            fields.remove(reserved);
        }

        Self {
            id,
            title,
            description,
            fields,
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[derive(FromRow)]
struct ListingRow {
    id: String,
    filter_value: String,
    title: String,
    description: String,
    attributes: Json<Map<String, Value>>,
}

impl ListingRow {
    fn into_listing(self, filter_field: &str) -> Listing {
        let Json(mut fields) = self.attributes;
        fields.insert(filter_field.to_string(), Value::String(self.filter_value));

        Listing::new(self.id, self.title, self.description, fields)
    }
}

#[derive(FromRow, Clone, Debug, PartialEq)]
pub struct Translation {
    pub id: String,
    pub listing_id: String,
    pub language: String,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Translation {
    pub fn revised_at(&self) -> NaiveDateTime {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Whether this row should win over `other` for the same listing and
    /// language: latest revision first, then the greater id.
    pub fn supersedes(&self, other: &Translation) -> bool {
        (self.revised_at(), &self.id) > (other.revised_at(), &other.id)
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Base rows whose filter field equals `filter_value`, in storage order.
    async fn find_listings(
        &self,
        collection: &Collection,
        filter_value: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Listing>, Error>;

    /// Translation rows in `language` for any of `listing_ids`.
    async fn find_translations(
        &self,
        collection: &Collection,
        language: &str,
        listing_ids: &[String],
    ) -> Result<Vec<Translation>, Error>;
}

pub async fn find_many_by_filter<'e, E: PgExecutor<'e>>(
    e: E,
    collection: &Collection,
    filter_value: &str,
    limit: Option<i64>,
) -> Result<Vec<Listing>, Error> {
    // Identifiers come from the static collection descriptors, never from input.
    let query = format!(
        "
            SELECT
                id,
                {field} AS filter_value,
                title,
                description,
                attributes
            FROM
                {table}
            WHERE
                {field} = $1
            ORDER BY
                created_at,
                id
            LIMIT $2
        ",
        field = collection.filter_field,
        table = collection.listings,
    );

    sqlx::query_as::<_, ListingRow>(&query)
        .bind(filter_value)
        .bind(limit)
        .fetch_all(e)
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|row| row.into_listing(collection.filter_field))
                .collect()
        })
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching {} with {} {}: {}",
                collection.listings,
                collection.filter_field,
                filter_value,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_many_translations<'e, E: PgExecutor<'e>>(
    e: E,
    collection: &Collection,
    language: &str,
    listing_ids: &[String],
) -> Result<Vec<Translation>, Error> {
    let query = format!(
        "
            SELECT
                id,
                listing_id,
                language,
                title,
                description,
                created_at,
                updated_at
            FROM
                {table}
            WHERE
                language = $1
                AND listing_id = ANY($2)
        ",
        table = collection.translations,
    );

    sqlx::query_as::<_, Translation>(&query)
        .bind(language)
        .bind(listing_ids.to_vec())
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching {} in {}: {}",
                collection.translations,
                language,
                err
            );
            Error::UnexpectedError
        })
}

#[derive(Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn find_listings(
        &self,
        collection: &Collection,
        filter_value: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Listing>, Error> {
        find_many_by_filter(&self.pool, collection, filter_value, limit).await
    }

    async fn find_translations(
        &self,
        collection: &Collection,
        language: &str,
        listing_ids: &[String],
    ) -> Result<Vec<Translation>, Error> {
        find_many_translations(&self.pool, collection, language, listing_ids).await
    }
}
