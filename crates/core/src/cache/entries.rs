//! Entry operations within a store.
//!
//! Entries are response snapshots keyed by `(store, request_key)`.
//! Writes are UPSERTs: concurrent write-backs for the same key settle as
//! last-write-wins.

use super::connection::CacheDb;
use super::snapshot::ResponseSnapshot;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

const UPSERT_ENTRY: &str = "INSERT INTO entries (
        store, request_key, method, url, final_url, status, kind,
        content_type, headers_json, body, stored_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    ON CONFLICT(store, request_key) DO UPDATE SET
        method = excluded.method,
        url = excluded.url,
        final_url = excluded.final_url,
        status = excluded.status,
        kind = excluded.kind,
        content_type = excluded.content_type,
        headers_json = excluded.headers_json,
        body = excluded.body,
        stored_at = excluded.stored_at";

fn insert_entry(conn: &rusqlite::Connection, store: &str, snapshot: &ResponseSnapshot) -> Result<(), Error> {
    conn.execute(
        UPSERT_ENTRY,
        params![
            store,
            &snapshot.request_key,
            &snapshot.method,
            &snapshot.url,
            &snapshot.final_url,
            snapshot.status as i64,
            snapshot.kind.as_str(),
            &snapshot.content_type,
            &snapshot.headers_json,
            &snapshot.body,
            &snapshot.stored_at,
        ],
    )?;
    Ok(())
}

fn row_to_snapshot(row: &rusqlite::Row<'_>) -> Result<ResponseSnapshot, rusqlite::Error> {
    Ok(ResponseSnapshot {
        request_key: row.get(0)?,
        method: row.get(1)?,
        url: row.get(2)?,
        final_url: row.get(3)?,
        status: row.get::<_, i64>(4)? as u16,
        // Parsed after the row is read; a bad column fails the lookup.
        kind: super::snapshot::ResponseKind::Basic,
        content_type: row.get(6)?,
        headers_json: row.get(7)?,
        body: row.get(8)?,
        stored_at: row.get(9)?,
    })
}

impl CacheDb {
    /// Insert or overwrite one entry in a store.
    ///
    /// The store must already exist; foreign keys reject writes into a
    /// store that was never opened (or was already evicted).
    pub async fn put_entry(&self, store: &str, snapshot: &ResponseSnapshot) -> Result<(), Error> {
        let store = store.to_string();
        let snapshot = snapshot.clone();
        self.conn
            .call(move |conn| insert_entry(conn, &store, &snapshot))
            .await
            .map_err(Error::from)
    }

    /// Insert a batch of entries in a single transaction.
    ///
    /// Either every snapshot lands in the store or none do, which is what
    /// install-time pre-caching relies on.
    pub async fn put_all(&self, store: &str, snapshots: Vec<ResponseSnapshot>) -> Result<(), Error> {
        let store = store.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                for snapshot in &snapshots {
                    insert_entry(&tx, &store, snapshot)?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up an entry by request key.
    ///
    /// Returns None if the store has no entry under that key.
    pub async fn match_entry(&self, store: &str, request_key: &str) -> Result<Option<ResponseSnapshot>, Error> {
        let store = store.to_string();
        let request_key = request_key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<ResponseSnapshot>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT request_key, method, url, final_url, status, kind,
                            content_type, headers_json, body, stored_at
                     FROM entries WHERE store = ?1 AND request_key = ?2",
                )?;

                let result = stmt.query_row(params![store, request_key], |row| {
                    let kind: String = row.get(5)?;
                    let snapshot = row_to_snapshot(row)?;
                    Ok((kind, snapshot))
                });

                match result {
                    Ok((kind, mut snapshot)) => {
                        snapshot.kind = kind.parse()?;
                        Ok(Some(snapshot))
                    }
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of entries in a store.
    pub async fn entry_count(&self, store: &str) -> Result<u64, Error> {
        let store = store.to_string();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM entries WHERE store = ?1",
                    params![store],
                    |row| row.get(0),
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
