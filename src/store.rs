use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sql_query;
use diesel::upsert::excluded;
use thiserror::Error;

use crate::model::{DictionaryEntry, ImportRecord, NewEntry};
use crate::schema::entries;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("database error")]
    Database(#[from] diesel::result::Error),
    #[error("no entry with id {0}")]
    NotFound(i32),
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Durable word-keyed dictionary store over a pooled SQLite database.
pub struct DictStore {
    pool: DbPool,
}

impl DictStore {
    /// Opens (or creates) the store at `database_url` and ensures the
    /// schema exists.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let store = DictStore { pool };
        store.ensure_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, StoreError> {
        Ok(self.pool.get()?)
    }

    fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        sql_query(
            "CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                word VARCHAR(64) NOT NULL COLLATE NOCASE,
                phonetic VARCHAR(64) NOT NULL DEFAULT '',
                translation TEXT NOT NULL DEFAULT '',
                exchange TEXT NOT NULL DEFAULT '',
                definition TEXT NOT NULL DEFAULT '',
                ignored BOOLEAN NOT NULL DEFAULT FALSE
            )",
        )
        .execute(&mut conn)?;
        sql_query("CREATE UNIQUE INDEX IF NOT EXISTS entries_word_idx ON entries (word)")
            .execute(&mut conn)?;
        Ok(())
    }

    /// Case-insensitive point lookup. Absence is `Ok(None)`, not an error.
    pub fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, StoreError> {
        let mut conn = self.conn()?;
        let entry = entries::table
            .filter(entries::word.eq(word))
            .select(DictionaryEntry::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(entry)
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<DictionaryEntry>, StoreError> {
        let mut conn = self.conn()?;
        let entry = entries::table
            .find(id)
            .select(DictionaryEntry::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(entry)
    }

    /// Persists the ignored flag for one entry. Durable before returning.
    pub fn set_ignored(&self, id: i32, ignored: bool) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let affected = diesel::update(entries::table.find(id))
            .set(entries::ignored.eq(ignored))
            .execute(&mut conn)?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Loads every record inside one transaction, insert-or-update keyed
    /// by the case-insensitive word. An existing headword keeps its id and
    /// ignored flag; only the content fields are overwritten. Duplicate
    /// words within one batch resolve last-write-wins.
    pub fn bulk_import(&self, records: &[ImportRecord]) -> Result<usize, StoreError> {
        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for record in records {
                diesel::insert_into(entries::table)
                    .values(&NewEntry {
                        word: &record.word,
                        phonetic: &record.phonetic,
                        translation: &record.translation,
                        exchange: &record.exchange,
                        definition: &record.definition,
                    })
                    .on_conflict(entries::word)
                    .do_update()
                    .set((
                        entries::word.eq(excluded(entries::word)),
                        entries::phonetic.eq(excluded(entries::phonetic)),
                        entries::translation.eq(excluded(entries::translation)),
                        entries::exchange.eq(excluded(entries::exchange)),
                        entries::definition.eq(excluded(entries::definition)),
                    ))
                    .execute(conn)?;
            }
            Ok(())
        })?;
        log::info!("imported {} dictionary records", records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> DictStore {
        let path = dir.path().join("dict.db");
        DictStore::open(path.to_str().unwrap()).unwrap()
    }

    fn record(word: &str, translation: &str) -> ImportRecord {
        ImportRecord {
            word: word.to_string(),
            phonetic: String::new(),
            translation: translation.to_string(),
            exchange: String::new(),
            definition: String::new(),
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.bulk_import(&[record("Good", "adj. 好的")]).unwrap();

        let entry = store.lookup("good").unwrap().unwrap();
        assert_eq!(entry.word, "Good");
        assert!(!entry.ignored);
        assert!(store.lookup("GOOD").unwrap().is_some());
    }

    #[test]
    fn missing_word_is_none() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.lookup("absent").unwrap().is_none());
    }

    #[test]
    fn set_ignored_on_unknown_id_fails() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let err = store.set_ignored(99, true).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }

    #[test]
    fn set_ignored_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict.db");
        let id = {
            let store = DictStore::open(path.to_str().unwrap()).unwrap();
            store.bulk_import(&[record("cat", "n. 猫")]).unwrap();
            let id = store.lookup("cat").unwrap().unwrap().id;
            store.set_ignored(id, true).unwrap();
            id
        };

        let reopened = DictStore::open(path.to_str().unwrap()).unwrap();
        let entry = reopened.lookup("cat").unwrap().unwrap();
        assert_eq!(entry.id, id);
        assert!(entry.ignored);
    }

    #[test]
    fn reimport_keeps_id_and_ignored_flag() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.bulk_import(&[record("good", "old text")]).unwrap();
        let before = store.lookup("good").unwrap().unwrap();
        store.set_ignored(before.id, true).unwrap();

        store.bulk_import(&[record("good", "new text")]).unwrap();
        let after = store.lookup("good").unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.translation, "new text");
        assert!(after.ignored);
    }

    #[test]
    fn duplicate_words_in_one_batch_last_wins() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store
            .bulk_import(&[record("good", "first"), record("GOOD", "second")])
            .unwrap();

        let entry = store.lookup("good").unwrap().unwrap();
        assert_eq!(entry.word, "GOOD");
        assert_eq!(entry.translation, "second");
    }
}
