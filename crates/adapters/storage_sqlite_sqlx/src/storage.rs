//! `SQLite` implementation of the [`Storage`] port.
//!
//! Each kind has its own table named after its collection. A row carries the
//! record's JSON body next to the columns needed for lookups: id, timestamps
//! and foreign keys. Place links live in `place_amenity` and are folded back
//! into `amenity_ids` when places are read.

use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::Storage;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::kind::Kind;
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;
use hbnb_domain::review::Review;
use hbnb_domain::time::Timestamp;

use crate::error::StorageError;

/// A stored row, before its body is decoded into a record.
struct Stored {
    id: String,
    body: String,
}

impl<'r> FromRow<'r, SqliteRow> for Stored {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            body: row.try_get("body")?,
        })
    }
}

/// One place/amenity link.
struct Link {
    place_id: String,
    amenity_id: AmenityId,
}

impl<'r> FromRow<'r, SqliteRow> for Link {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let place_id: String = row.try_get("place_id")?;
        let amenity_id: String = row.try_get("amenity_id")?;

        let amenity_id =
            AmenityId::from_str(&amenity_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self {
            place_id,
            amenity_id,
        })
    }
}

const SELECT_LINKS: &str = "SELECT place_id, amenity_id FROM place_amenity ORDER BY rowid";
const SELECT_LINKS_OF_PLACE: &str =
    "SELECT place_id, amenity_id FROM place_amenity WHERE place_id = ? ORDER BY rowid";
const INSERT_LINK: &str = "INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?, ?)";
const DELETE_LINK: &str = "DELETE FROM place_amenity WHERE place_id = ? AND amenity_id = ?";
const SELECT_AMENITIES_OF_PLACE: &str = "SELECT a.id, a.body FROM amenities a \
     JOIN place_amenity pa ON pa.amenity_id = a.id \
     WHERE pa.place_id = ? ORDER BY pa.rowid";

/// Fixed-width timestamp so the text column sorts chronologically.
fn sortable(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn select_all(kind: Kind) -> String {
    format!(
        "SELECT id, body FROM {} ORDER BY created_at, id",
        kind.collection()
    )
}

fn select_by_id(kind: Kind) -> String {
    format!("SELECT id, body FROM {} WHERE id = ?", kind.collection())
}

fn select_children(kind: Kind, foreign_key: &str) -> String {
    format!(
        "SELECT id, body FROM {} WHERE {foreign_key} = ? ORDER BY created_at, id",
        kind.collection()
    )
}

fn insert(kind: Kind, foreign_keys: &[(&'static str, String)]) -> String {
    let mut columns = vec!["id", "created_at", "updated_at", "body"];
    columns.extend(foreign_keys.iter().map(|(key, _)| *key));
    let params = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({params})",
        kind.collection(),
        columns.join(", ")
    )
}

fn update(kind: Kind, foreign_keys: &[(&'static str, String)]) -> String {
    let mut assignments = vec!["updated_at = ?".to_string(), "body = ?".to_string()];
    assignments.extend(foreign_keys.iter().map(|(key, _)| format!("{key} = ?")));
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        kind.collection(),
        assignments.join(", ")
    )
}

fn delete_by_id(kind: Kind) -> String {
    format!("DELETE FROM {} WHERE id = ?", kind.collection())
}

fn count(kind: Kind) -> String {
    format!("SELECT COUNT(*) FROM {}", kind.collection())
}

/// JSON body of a record; links are kept out since the join table owns them.
fn encode<R: Record>(record: &R) -> Result<String, StorageError> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.remove("amenity_ids");
    }
    Ok(serde_json::to_string(&value)?)
}

/// Decode rows into records, attaching amenity links to places.
async fn decode<R: Record>(pool: &SqlitePool, rows: Vec<Stored>) -> Result<Vec<R>, StorageError> {
    let mut links = if R::KIND == Kind::Place && !rows.is_empty() {
        load_links(pool, rows.as_slice()).await?
    } else {
        HashMap::new()
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let mut record: R = serde_json::from_str(&row.body)?;
        if let Some(amenity_ids) = record.amenity_ids_mut() {
            *amenity_ids = links.remove(&row.id).unwrap_or_default();
        }
        records.push(record);
    }
    Ok(records)
}

async fn load_links(
    pool: &SqlitePool,
    rows: &[Stored],
) -> Result<HashMap<String, Vec<AmenityId>>, StorageError> {
    if let [single] = rows {
        let linked = links_of(pool, &single.id).await?;
        return Ok(HashMap::from([(single.id.clone(), linked)]));
    }

    let links: Vec<Link> = sqlx::query_as(SELECT_LINKS).fetch_all(pool).await?;

    let mut by_place: HashMap<String, Vec<AmenityId>> = HashMap::new();
    for link in links {
        by_place
            .entry(link.place_id)
            .or_default()
            .push(link.amenity_id);
    }
    Ok(by_place)
}

/// Amenities currently linked to one place, in link order.
async fn links_of(pool: &SqlitePool, place_id: &str) -> Result<Vec<AmenityId>, StorageError> {
    let links: Vec<Link> = sqlx::query_as(SELECT_LINKS_OF_PLACE)
        .bind(place_id)
        .fetch_all(pool)
        .await?;
    Ok(links.into_iter().map(|link| link.amenity_id).collect())
}

/// `SQLite`-backed storage for every record kind.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new storage using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn children<R: Record>(
        &self,
        foreign_key: &'static str,
        parent: String,
    ) -> impl Future<Output = Result<Vec<R>, HbnbError>> + Send {
        let pool = self.pool.clone();
        let sql = select_children(R::KIND, foreign_key);
        async move {
            let rows: Vec<Stored> = sqlx::query_as(&sql)
                .bind(parent)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(decode(&pool, rows).await?)
        }
    }
}

impl Storage for SqliteStorage {
    fn get<R: Record>(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HbnbError>> + Send {
        let pool = self.pool.clone();
        let sql = select_by_id(R::KIND);
        async move {
            let row: Option<Stored> = sqlx::query_as(&sql)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let records = decode::<R>(&pool, row.into_iter().collect()).await?;
            Ok(records.into_iter().next())
        }
    }

    fn all<R: Record>(&self) -> impl Future<Output = Result<Vec<R>, HbnbError>> + Send {
        let pool = self.pool.clone();
        let sql = select_all(R::KIND);
        async move {
            let rows: Vec<Stored> = sqlx::query_as(&sql)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(decode(&pool, rows).await?)
        }
    }

    fn insert<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        let pool = self.pool.clone();
        async move {
            let foreign_keys = record.foreign_keys();
            let sql = insert(R::KIND, &foreign_keys);
            let body = encode(&record)?;

            let mut query = sqlx::query(&sql)
                .bind(record.id().to_string())
                .bind(sortable(record.created_at()))
                .bind(sortable(record.updated_at()))
                .bind(body);
            for (_, value) in foreign_keys {
                query = query.bind(value);
            }
            query.execute(&pool).await.map_err(StorageError::from)?;

            tracing::debug!(kind = %R::KIND, id = %record.id(), "record inserted");
            Ok(record)
        }
    }

    fn update<R: Record>(&self, record: R) -> impl Future<Output = Result<R, HbnbError>> + Send {
        let pool = self.pool.clone();
        async move {
            let foreign_keys = record.foreign_keys();
            let sql = update(R::KIND, &foreign_keys);
            let body = encode(&record)?;

            let mut query = sqlx::query(&sql)
                .bind(sortable(record.updated_at()))
                .bind(body);
            for (_, value) in foreign_keys {
                query = query.bind(value);
            }
            let result = query
                .bind(record.id().to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            if result.rows_affected() == 0 {
                return Err(NotFoundError::new(R::KIND, record.id()).into());
            }

            let mut record = record;
            if R::KIND == Kind::Place {
                let linked = links_of(&pool, &record.id().to_string()).await?;
                if let Some(amenity_ids) = record.amenity_ids_mut() {
                    *amenity_ids = linked;
                }
            }
            Ok(record)
        }
    }

    fn delete<R: Record>(&self, id: R::Id) -> impl Future<Output = Result<(), HbnbError>> + Send {
        let pool = self.pool.clone();
        let sql = delete_by_id(R::KIND);
        async move {
            let result = sqlx::query(&sql)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(kind = %R::KIND, %id, rows = result.rows_affected(), "record deleted");
            Ok(())
        }
    }

    fn count(&self, kind: Kind) -> impl Future<Output = Result<u64, HbnbError>> + Send {
        let pool = self.pool.clone();
        let sql = count(kind);
        async move {
            let (total,): (i64,) = sqlx::query_as(&sql)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(u64::try_from(total).unwrap_or_default())
        }
    }

    fn cities_of(
        &self,
        state: StateId,
    ) -> impl Future<Output = Result<Vec<City>, HbnbError>> + Send {
        self.children("state_id", state.to_string())
    }

    fn places_of(&self, city: CityId) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send {
        self.children("city_id", city.to_string())
    }

    fn reviews_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Review>, HbnbError>> + Send {
        self.children("place_id", place.to_string())
    }

    fn amenities_of(
        &self,
        place: PlaceId,
    ) -> impl Future<Output = Result<Vec<Amenity>, HbnbError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Stored> = sqlx::query_as(SELECT_AMENITIES_OF_PLACE)
                .bind(place.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(decode(&pool, rows).await?)
        }
    }

    fn link_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT_LINK)
                .bind(place.to_string())
                .bind(amenity.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn unlink_amenity(
        &self,
        place: PlaceId,
        amenity: AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_LINK)
                .bind(place.to_string())
                .bind(amenity.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
