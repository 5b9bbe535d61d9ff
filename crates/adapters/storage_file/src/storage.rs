//! JSON object store implementing [`Storage`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use hbnb_app::ports::Storage;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, StateId};
use hbnb_domain::kind::Kind;
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;
use hbnb_domain::review::Review;

use crate::error::StorageError;

/// Every stored record, keyed `"<Class>.<id>"`.
type Objects = BTreeMap<String, Value>;

fn key(kind: Kind, id: impl std::fmt::Display) -> String {
    format!("{}.{id}", kind.class_name())
}

fn prefix(kind: Kind) -> String {
    format!("{}.", kind.class_name())
}

fn of_kind(objects: &Objects, kind: Kind) -> impl Iterator<Item = (&String, &Value)> {
    let prefix = prefix(kind);
    objects
        .range(prefix.clone()..)
        .take_while(move |(key, _)| key.starts_with(&prefix))
}

fn decode<R: Record>(value: &Value) -> Result<R, StorageError> {
    Ok(serde_json::from_value(value.clone())?)
}

fn decode_all<R: Record>(objects: &Objects) -> Result<Vec<R>, StorageError> {
    let mut records = of_kind(objects, R::KIND)
        .map(|(_, value)| decode::<R>(value))
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
    });
    Ok(records)
}

fn find<R: Record>(objects: &Objects, id: R::Id) -> Result<Option<R>, StorageError> {
    objects.get(&key(R::KIND, id)).map(decode::<R>).transpose()
}

fn put<R: Record>(objects: &mut Objects, record: &R) -> Result<(), StorageError> {
    objects.insert(key(R::KIND, record.id()), serde_json::to_value(record)?);
    Ok(())
}

/// Remove a record and, transitively, everything referencing it.
fn remove_cascading(objects: &mut Objects, kind: Kind, id: String) {
    let mut pending = vec![(kind, id)];
    while let Some((kind, id)) = pending.pop() {
        if objects.remove(&key(kind, &id)).is_none() {
            continue;
        }
        for (dependent, foreign_key) in kind.dependents() {
            pending.extend(
                of_kind(objects, *dependent)
                    .filter(|(_, value)| value.get(foreign_key).and_then(Value::as_str) == Some(id.as_str()))
                    .filter_map(|(_, value)| value.get("id").and_then(Value::as_str))
                    .map(|child| (*dependent, child.to_string())),
            );
        }
        if kind == Kind::Amenity {
            drop_amenity_links(objects, &id);
        }
        tracing::debug!(%kind, %id, "record removed");
    }
}

fn drop_amenity_links(objects: &mut Objects, amenity_id: &str) {
    let prefix = prefix(Kind::Place);
    for (_, place) in objects
        .range_mut(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
    {
        if let Some(Value::Array(ids)) = place.get_mut("amenity_ids") {
            ids.retain(|linked| linked.as_str() != Some(amenity_id));
        }
    }
}

struct Inner {
    objects: Objects,
    path: Option<PathBuf>,
}

/// Write the object file, going through a temporary file so a crash never
/// leaves a truncated store behind.
async fn persist(path: &Path, objects: &Objects) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec(objects)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    tracing::debug!(path = %path.display(), objects = objects.len(), "store persisted");
    Ok(())
}

impl Inner {
    /// Replace the live objects with `objects` once they are on disk.
    ///
    /// Mutations work on a copy of the map; when the write fails the live
    /// objects are left untouched.
    async fn commit(&mut self, objects: Objects) -> Result<(), StorageError> {
        if let Some(path) = &self.path {
            persist(path, &objects).await?;
        }
        self.objects = objects;
        Ok(())
    }
}

/// File-backed record store.
///
/// Cloning is cheap and every clone shares the same objects. Mutations are
/// serialized behind an async mutex that stays held while the file is written.
#[derive(Clone)]
pub struct FileStorage {
    inner: Arc<Mutex<Inner>>,
}

impl FileStorage {
    /// Open the store at `path`, loading existing objects if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or
    /// does not hold a JSON object.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let objects = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Objects::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Objects::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::info!(path = %path.display(), objects = objects.len(), "file store loaded");
        Ok(Self::with_inner(Inner {
            objects,
            path: Some(path),
        }))
    }

    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_inner(Inner {
            objects: Objects::new(),
            path: None,
        })
    }

    fn with_inner(inner: Inner) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    async fn children<R: Record>(
        &self,
        foreign_key: &'static str,
        parent: String,
    ) -> Result<Vec<R>, HbnbError> {
        let inner = self.inner.lock().await;
        let mut records = decode_all::<R>(&inner.objects)?;
        records.retain(|record| {
            record
                .foreign_keys()
                .iter()
                .any(|(key, value)| *key == foreign_key && *value == parent)
        });
        Ok(records)
    }
}

impl Storage for FileStorage {
    async fn get<R: Record>(&self, id: R::Id) -> Result<Option<R>, HbnbError> {
        let inner = self.inner.lock().await;
        Ok(find::<R>(&inner.objects, id)?)
    }

    async fn all<R: Record>(&self) -> Result<Vec<R>, HbnbError> {
        let inner = self.inner.lock().await;
        Ok(decode_all::<R>(&inner.objects)?)
    }

    async fn insert<R: Record>(&self, record: R) -> Result<R, HbnbError> {
        let mut inner = self.inner.lock().await;
        let mut objects = inner.objects.clone();
        put(&mut objects, &record)?;
        inner.commit(objects).await?;
        Ok(record)
    }

    async fn update<R: Record>(&self, mut record: R) -> Result<R, HbnbError> {
        let mut inner = self.inner.lock().await;
        let Some(mut stored) = find::<R>(&inner.objects, record.id())? else {
            return Err(NotFoundError::new(R::KIND, record.id()).into());
        };
        // links only change through link_amenity and unlink_amenity
        if let (Some(current), Some(incoming)) = (stored.amenity_ids_mut(), record.amenity_ids_mut())
        {
            *incoming = std::mem::take(current);
        }
        let mut objects = inner.objects.clone();
        put(&mut objects, &record)?;
        inner.commit(objects).await?;
        Ok(record)
    }

    async fn delete<R: Record>(&self, id: R::Id) -> Result<(), HbnbError> {
        let mut inner = self.inner.lock().await;
        let mut objects = inner.objects.clone();
        remove_cascading(&mut objects, R::KIND, id.to_string());
        inner.commit(objects).await?;
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<u64, HbnbError> {
        let inner = self.inner.lock().await;
        let count = of_kind(&inner.objects, kind).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn cities_of(&self, state: StateId) -> Result<Vec<City>, HbnbError> {
        self.children("state_id", state.to_string()).await
    }

    async fn places_of(&self, city: CityId) -> Result<Vec<Place>, HbnbError> {
        self.children("city_id", city.to_string()).await
    }

    async fn reviews_of(&self, place: PlaceId) -> Result<Vec<Review>, HbnbError> {
        self.children("place_id", place.to_string()).await
    }

    async fn amenities_of(&self, place: PlaceId) -> Result<Vec<Amenity>, HbnbError> {
        let inner = self.inner.lock().await;
        let Some(place) = find::<Place>(&inner.objects, place)? else {
            return Ok(Vec::new());
        };
        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for id in place.amenity_ids {
            if let Some(amenity) = find::<Amenity>(&inner.objects, id)? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    async fn link_amenity(&self, place: PlaceId, amenity: AmenityId) -> Result<bool, HbnbError> {
        let mut inner = self.inner.lock().await;
        let Some(mut found) = find::<Place>(&inner.objects, place)? else {
            return Ok(false);
        };
        if found.amenity_ids.contains(&amenity) {
            return Ok(false);
        }
        found.amenity_ids.push(amenity);
        let mut objects = inner.objects.clone();
        put(&mut objects, &found)?;
        inner.commit(objects).await?;
        Ok(true)
    }

    async fn unlink_amenity(&self, place: PlaceId, amenity: AmenityId) -> Result<bool, HbnbError> {
        let mut inner = self.inner.lock().await;
        let Some(mut found) = find::<Place>(&inner.objects, place)? else {
            return Ok(false);
        };
        let before = found.amenity_ids.len();
        found.amenity_ids.retain(|id| *id != amenity);
        if found.amenity_ids.len() == before {
            return Ok(false);
        }
        let mut objects = inner.objects.clone();
        put(&mut objects, &found)?;
        inner.commit(objects).await?;
        Ok(true)
    }
}
