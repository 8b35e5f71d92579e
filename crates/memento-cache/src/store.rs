use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::origin::Asset;
use crate::schema;

/// Named caches of assets, all in one SQLite file. Mirrors the browser's
/// cache storage: several named caches, each mapping a request path to a
/// stored response.
///
/// The connection sits behind a mutex so a worker can be shared across
/// request handlers.
pub struct CacheStorage {
    conn: Mutex<Connection>,
}

impl CacheStorage {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite consistent; keep going.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // --- Caches ---

    /// Names of every cache holding at least one entry, sorted.
    pub fn cache_names(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT DISTINCT cache_name FROM entries ORDER BY cache_name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Drop a whole cache. Returns whether anything was removed.
    pub fn delete_cache(&self, name: &str) -> Result<bool> {
        let removed = self
            .conn()
            .execute("DELETE FROM entries WHERE cache_name = ?1", [name])?;
        Ok(removed > 0)
    }

    /// Delete every cache except `keep`. Returns the deleted names.
    pub fn retain_only(&self, keep: &str) -> Result<Vec<String>> {
        let mut deleted = Vec::new();
        for name in self.cache_names()? {
            if name != keep {
                self.delete_cache(&name)?;
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    pub fn entry_count(&self, name: &str) -> Result<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM entries WHERE cache_name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Paths stored in a cache, sorted.
    pub fn paths(&self, name: &str) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT path FROM entries WHERE cache_name = ?1 ORDER BY path")?;
        let paths = stmt
            .query_map([name], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(paths)
    }

    // --- Entries ---

    /// Store or replace one asset.
    pub fn put(&self, name: &str, asset: &Asset) -> Result<()> {
        Self::put_on(&self.conn(), name, asset)
    }

    /// Store several assets atomically: all land or none do.
    pub fn put_all(&self, name: &str, assets: &[Asset]) -> Result<()> {
        let conn = self.conn();
        let tx = conn.unchecked_transaction()?;
        for asset in assets {
            Self::put_on(&tx, name, asset)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn put_on(conn: &Connection, name: &str, asset: &Asset) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO entries (cache_name, path, status, content_type, body)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                asset.path,
                asset.status,
                asset.content_type,
                asset.body
            ],
        )?;
        Ok(())
    }

    /// Look a path up in one cache.
    pub fn match_in(&self, name: &str, path: &str) -> Result<Option<Asset>> {
        let asset = self
            .conn()
            .query_row(
                "SELECT path, status, content_type, body FROM entries
                 WHERE cache_name = ?1 AND path = ?2",
                params![name, path],
                row_to_asset,
            )
            .optional()?;
        Ok(asset)
    }

    /// Look a path up across every cache, earliest stored entry first.
    pub fn match_any(&self, path: &str) -> Result<Option<Asset>> {
        let asset = self
            .conn()
            .query_row(
                "SELECT path, status, content_type, body FROM entries
                 WHERE path = ?1 ORDER BY stored_at, rowid LIMIT 1",
                [path],
                row_to_asset,
            )
            .optional()?;
        Ok(asset)
    }
}

fn row_to_asset(row: &rusqlite::Row<'_>) -> rusqlite::Result<Asset> {
    Ok(Asset {
        path: row.get(0)?,
        status: row.get(1)?,
        content_type: row.get(2)?,
        body: row.get(3)?,
    })
}
