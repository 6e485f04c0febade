use std::mem;

use crate::{
    error::{CatalogError, Result},
    model::{MovieRecord, Person},
    storage::Storage,
};

pub const DEFAULT_STORAGE_KEY: &str = "oml_movies";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub posters_repaired: usize,
    pub records_restored: usize,
}

pub struct CatalogStore<S: Storage> {
    storage: S,
    key: String,
    collection: Vec<MovieRecord>,
}

impl<S: Storage> CatalogStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CatalogStore {
            storage,
            key: key.into(),
            collection: vec![],
        }
    }

    /// Loads the persisted collection, or starts from `seed` when nothing is
    /// stored yet. A stored collection is reconciled against `seed`: posters
    /// of matching titles are taken from the seed and seed titles missing
    /// from storage are appended. User records are never removed or
    /// reordered.
    ///
    /// A stored blob that does not parse is reported as
    /// [`CatalogError::CorruptPersistedState`] and left untouched.
    pub fn load(&mut self, seed: &[MovieRecord]) -> Result<Reconciliation> {
        let stored = match self.storage.get_item(&self.key)? {
            Some(blob) => blob,
            None => {
                log::info!(
                    "No stored catalog under '{}', starting from {} seed movies",
                    self.key,
                    seed.len()
                );
                let collection = seed.to_vec();
                save(&mut self.storage, &self.key, &collection)?;
                self.collection = collection;
                return Ok(Reconciliation::default());
            }
        };

        let mut collection: Vec<MovieRecord> = serde_json::from_str(&stored).map_err(|e| {
            log::error!("Stored catalog under '{}' does not parse: {}", self.key, e);
            CatalogError::CorruptPersistedState {
                key: self.key.clone(),
                source: e,
            }
        })?;

        let outcome = reconcile(&mut collection, seed);
        save(&mut self.storage, &self.key, &collection)?;
        self.collection = collection;

        log::info!(
            "Loaded {} movies ({} posters repaired, {} seed movies restored)",
            self.collection.len(),
            outcome.posters_repaired,
            outcome.records_restored
        );
        Ok(outcome)
    }

    pub fn get_all(&self) -> &[MovieRecord] {
        &self.collection
    }

    pub fn find_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.collection.iter().find(|movie| movie.title == title)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn upsert(&mut self, record: MovieRecord) -> Result<()> {
        match self.position(&record.title) {
            Some(index) => {
                log::debug!("Overwriting movie '{}' at position {}", record.title, index);
                let previous = mem::replace(&mut self.collection[index], record);
                if let Err(e) = self.persist() {
                    self.collection[index] = previous;
                    return Err(e);
                }
            }
            None => {
                log::debug!("Adding movie '{}'", record.title);
                self.collection.insert(0, record);
                if let Err(e) = self.persist() {
                    self.collection.remove(0);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Replaces the record titled `original_title` with `record`, keeping its
    /// position. `record` may carry a different title, which is how a movie
    /// gets renamed. Returns `false` without touching anything when
    /// `original_title` is unknown.
    pub fn replace(&mut self, original_title: &str, record: MovieRecord) -> Result<bool> {
        let index = match self.position(original_title) {
            Some(index) => index,
            None => {
                log::debug!("No movie titled '{}' to replace", original_title);
                return Ok(false);
            }
        };

        if record.title != original_title {
            log::debug!("Renaming movie '{}' to '{}'", original_title, record.title);
        }
        let previous = mem::replace(&mut self.collection[index], record);
        if let Err(e) = self.persist() {
            self.collection[index] = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Sets one person's score on a movie. Unknown titles are ignored and
    /// reported as `false`. The value range is not checked here.
    pub fn set_rating(&mut self, title: &str, person: Person, value: i64) -> Result<bool> {
        let index = match self.position(title) {
            Some(index) => index,
            None => {
                log::debug!("Ignoring rating for unknown movie '{}'", title);
                return Ok(false);
            }
        };

        let movie = &mut self.collection[index];
        if !movie.has_normalized_rating() {
            log::debug!("Upgrading legacy rating of '{}'", title);
        }
        let previous = movie.rating.clone();
        movie.set_score(person, value);
        if let Err(e) = self.persist() {
            self.collection[index].rating = previous;
            return Err(e);
        }
        Ok(true)
    }

    pub fn persist(&mut self) -> Result<()> {
        save(&mut self.storage, &self.key, &self.collection)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.collection.iter().position(|movie| movie.title == title)
    }
}

fn save<S: Storage>(storage: &mut S, key: &str, collection: &[MovieRecord]) -> Result<()> {
    let blob = serde_json::to_string(collection).map_err(CatalogError::Serialize)?;
    storage.set_item(key, &blob)
}

fn reconcile(collection: &mut Vec<MovieRecord>, seed: &[MovieRecord]) -> Reconciliation {
    let mut outcome = Reconciliation::default();

    for seed_movie in seed {
        match collection.iter_mut().find(|m| m.title == seed_movie.title) {
            Some(existing) => {
                if existing.poster != seed_movie.poster {
                    existing.poster = seed_movie.poster.clone();
                    outcome.posters_repaired += 1;
                }
            }
            None => {
                collection.push(seed_movie.clone());
                outcome.records_restored += 1;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Rating, RatingField},
        storage::MemoryStorage,
    };
    use serde_json::json;
    use std::{cell::Cell, io, rc::Rc};

    fn movie(title: &str) -> MovieRecord {
        MovieRecord::new(title, format!("images/{}.jpg", title.to_lowercase()))
    }

    fn titles<S: Storage>(store: &CatalogStore<S>) -> Vec<&str> {
        store.get_all().iter().map(|m| m.title.as_str()).collect()
    }

    fn store_with_blob(blob: &str) -> CatalogStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_STORAGE_KEY, blob).unwrap();
        CatalogStore::new(storage)
    }

    fn stored_value<S: Storage>(store: &CatalogStore<S>) -> serde_json::Value {
        let blob = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&blob).unwrap()
    }

    #[test]
    fn empty_storage_starts_from_seed_and_persists() {
        let seed = vec![movie("A"), movie("B")];
        let mut store = CatalogStore::new(MemoryStorage::new());

        let outcome = store.load(&seed).unwrap();

        assert_eq!(outcome, Reconciliation::default());
        assert_eq!(store.get_all(), seed.as_slice());
        assert_eq!(stored_value(&store), serde_json::to_value(&seed).unwrap());
    }

    #[test]
    fn reconciliation_only_repairs_poster() {
        let mut store = store_with_blob(
            &json!([{"title": "X", "poster": "old.jpg", "actors": "A"}]).to_string(),
        );
        let mut seed_movie = MovieRecord::new("X", "new.jpg");
        seed_movie.actors = Some("B".to_string());

        let outcome = store.load(&[seed_movie]).unwrap();

        assert_eq!(outcome.posters_repaired, 1);
        let mut expected = MovieRecord::new("X", "new.jpg");
        expected.actors = Some("A".to_string());
        assert_eq!(store.get_all(), &[expected]);
        assert_eq!(stored_value(&store)[0]["poster"], "new.jpg");
    }

    #[test]
    fn missing_seed_movie_is_appended_at_the_end() {
        let stored = vec![movie("C"), movie("A")];
        let mut store = store_with_blob(&serde_json::to_string(&stored).unwrap());

        let outcome = store.load(&[movie("A"), movie("B")]).unwrap();

        assert_eq!(outcome.records_restored, 1);
        assert_eq!(titles(&store), vec!["C", "A", "B"]);
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let stored = vec![MovieRecord::new("A", "stale.jpg"), movie("Z")];
        let seed = vec![movie("A"), movie("B")];
        let mut store = store_with_blob(&serde_json::to_string(&stored).unwrap());

        store.load(&seed).unwrap();
        let once = store.get_all().to_vec();

        let mut reloaded = CatalogStore::new(store.into_storage());
        let outcome = reloaded.load(&seed).unwrap();

        assert_eq!(outcome, Reconciliation::default());
        assert_eq!(reloaded.get_all(), once.as_slice());
    }

    #[test]
    fn corrupt_blob_is_reported_and_left_alone() {
        let mut store = store_with_blob("{not json");

        let err = store.load(&[movie("A")]).unwrap_err();

        assert!(matches!(
            err,
            CatalogError::CorruptPersistedState { ref key, .. } if key == DEFAULT_STORAGE_KEY
        ));
        assert!(store.is_empty());
        assert_eq!(
            store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let mut store = CatalogStore::new(MemoryStorage::new());
        store.load(&[movie("A"), movie("B"), movie("C")]).unwrap();

        let mut edited = MovieRecord::new("B", "b2.jpg");
        edited.comments = Some("rewatch".to_string());
        store.upsert(edited.clone()).unwrap();

        assert_eq!(titles(&store), vec!["A", "B", "C"]);
        assert_eq!(store.find_by_title("B"), Some(&edited));
        assert_eq!(stored_value(&store)[1]["comments"], "rewatch");
    }

    #[test]
    fn upsert_prepends_new_titles() {
        let mut store = CatalogStore::new(MemoryStorage::new());
        store.load(&[movie("A"), movie("B")]).unwrap();

        store.upsert(movie("Z")).unwrap();

        assert_eq!(titles(&store), vec!["Z", "A", "B"]);
        assert_eq!(stored_value(&store)[0]["title"], "Z");
    }

    #[test]
    fn replace_renames_in_place() {
        let mut store = CatalogStore::new(MemoryStorage::new());
        store.load(&[movie("A"), movie("B"), movie("C")]).unwrap();

        assert!(store.replace("B", movie("B2")).unwrap());
        assert_eq!(titles(&store), vec!["A", "B2", "C"]);

        assert!(!store.replace("missing", movie("Q")).unwrap());
        assert_eq!(titles(&store), vec!["A", "B2", "C"]);
    }

    #[test]
    fn rating_normalizes_absent_rating() {
        let mut store = CatalogStore::new(MemoryStorage::new());
        store.load(&[movie("A")]).unwrap();

        assert!(store.set_rating("A", Person::O, 4).unwrap());

        let rated = store.find_by_title("A").unwrap();
        assert_eq!(rated.rating, Some(RatingField::Scores(Rating::new(4, 0, 0))));
        assert_eq!(stored_value(&store)[0]["rating"], json!({"O": 4, "M": 0, "L": 0}));
    }

    #[test]
    fn rating_unknown_title_changes_nothing() {
        let mut store = CatalogStore::new(MemoryStorage::new());
        store.load(&[movie("A"), movie("B")]).unwrap();
        let before = store.get_all().to_vec();
        let blob_before = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap();

        assert!(!store.set_rating("nope", Person::M, 3).unwrap());

        assert_eq!(store.get_all(), before.as_slice());
        assert_eq!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap(), blob_before);
    }

    #[test]
    fn legacy_rating_survives_until_rated() {
        let blob = json!([{"title": "A", "poster": "a.jpg", "rating": "5 stars"}]).to_string();
        let mut store = store_with_blob(&blob);

        store.load(&[]).unwrap();
        assert_eq!(stored_value(&store)[0]["rating"], "5 stars");

        store.set_rating("A", Person::L, 1).unwrap();
        assert_eq!(stored_value(&store)[0]["rating"], json!({"O": 0, "M": 0, "L": 1}));
    }

    #[test]
    fn custom_key_is_used_for_storage() {
        let mut store = CatalogStore::with_key(MemoryStorage::new(), "backup");
        store.load(&[movie("A")]).unwrap();

        assert!(store.storage().get_item("backup").unwrap().is_some());
        assert!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: Rc<Cell<bool>>,
    }

    impl Storage for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
            }
            self.inner.set_item(key, value)
        }
    }

    fn flaky_store(seed: &[MovieRecord]) -> (CatalogStore<FlakyStorage>, Rc<Cell<bool>>) {
        let fail_writes = Rc::new(Cell::new(false));
        let mut store = CatalogStore::new(FlakyStorage {
            inner: MemoryStorage::new(),
            fail_writes: fail_writes.clone(),
        });
        store.load(seed).unwrap();
        fail_writes.set(true);
        (store, fail_writes)
    }

    #[test]
    fn failed_writes_leave_collection_as_stored() {
        let mut legacy = movie("B");
        legacy.rating = Some(RatingField::Legacy(json!("5 stars")));
        let (mut store, _fail_writes) = flaky_store(&[movie("A"), legacy]);
        let before = store.get_all().to_vec();
        let blob_before = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap();

        assert!(matches!(store.upsert(movie("Z")), Err(CatalogError::Io(_))));
        assert!(store.upsert(MovieRecord::new("A", "other.jpg")).is_err());
        assert!(store.replace("A", movie("A2")).is_err());
        assert!(store.set_rating("B", Person::O, 4).is_err());

        assert_eq!(store.get_all(), before.as_slice());
        assert_eq!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap(), blob_before);
    }

    #[test]
    fn failed_first_write_keeps_collection_empty() {
        let fail_writes = Rc::new(Cell::new(true));
        let mut store = CatalogStore::new(FlakyStorage {
            inner: MemoryStorage::new(),
            fail_writes: fail_writes.clone(),
        });

        assert!(store.load(&[movie("A")]).is_err());
        assert!(store.is_empty());

        fail_writes.set(false);
        store.load(&[movie("A")]).unwrap();
        assert_eq!(titles(&store), vec!["A"]);
    }
}
