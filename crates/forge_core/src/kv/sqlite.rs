//! SQLite-backed key-value store over the `kv_entries` table.

use super::{KvResult, KvStore};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store borrowing a migrated connection (see `db::open_db`).
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::open_db_in_memory;
    use crate::kv::KvStore;

    #[test]
    fn set_get_overwrite_and_remove() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteKvStore::new(&conn);

        assert_eq!(store.get("cards").unwrap(), None);
        store.set("cards", b"one").unwrap();
        store.set("cards", b"two").unwrap();
        assert_eq!(store.get("cards").unwrap(), Some(b"two".to_vec()));

        store.remove("cards").unwrap();
        store.remove("cards").unwrap();
        assert_eq!(store.get("cards").unwrap(), None);
    }
}
