//! SQLite-backed annotation datastore.
//!
//! Reads the result database layout written by the annotation pipeline:
//!
//! - `info (colkey, colval)`: run provenance
//! - `sample (base__sample_id, ...)`: sample membership
//! - `variant (base__chrom, base__pos, ...)`: one row per annotated variant

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::row::{Provenance, VariantRow};
use crate::store::AnnotationStore;

const INFO_QUERY: &str = "SELECT colval FROM info WHERE colkey = ?1";
const SAMPLE_QUERY: &str = "SELECT DISTINCT base__sample_id FROM sample";
const COUNT_QUERY: &str = "SELECT COUNT(*) FROM variant";
const VARIANT_QUERY: &str = "SELECT base__chrom, base__pos, base__pos_end, base__ref_base, \
     base__alt_base, tagsampler__samples, base__hugo, base__transcript, base__refseq, \
     base__so, base__achange, base__cchange, base__all_mappings FROM variant";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing result database read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| IngestError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "opened annotation database");
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn info_value(&self, key: &'static str) -> Result<String> {
        self.conn
            .query_row(INFO_QUERY, [key], |row| row.get::<_, Option<String>>(0))
            .optional()
            .map_err(|source| IngestError::Query {
                query: INFO_QUERY,
                source,
            })?
            .flatten()
            .ok_or(IngestError::MissingProvenance { key })
    }
}

impl AnnotationStore for SqliteStore {
    fn provenance(&self) -> Result<Provenance> {
        Ok(Provenance {
            input_paths: self.info_value("input_paths")?,
            annotators: self.info_value("annotators")?,
            mapper: self.info_value("mapper")?,
        })
    }

    fn sample_ids(&self) -> Result<Vec<String>> {
        let query_error = |source| IngestError::Query {
            query: SAMPLE_QUERY,
            source,
        };
        let mut stmt = self.conn.prepare(SAMPLE_QUERY).map_err(query_error)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))
            .map_err(query_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)?;
        Ok(ids.into_iter().flatten().collect())
    }

    fn variant_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(COUNT_QUERY, [], |row| row.get(0))
            .map_err(|source| IngestError::Query {
                query: COUNT_QUERY,
                source,
            })?;
        Ok(count.max(0) as u64)
    }

    fn visit_variants<F, E>(&self, mut visit: F) -> std::result::Result<u64, E>
    where
        F: FnMut(VariantRow) -> std::result::Result<(), E>,
        E: From<IngestError>,
    {
        let query_error = |source| IngestError::Query {
            query: VARIANT_QUERY,
            source,
        };
        let mut stmt = self.conn.prepare(VARIANT_QUERY).map_err(query_error)?;
        let mut rows = stmt.query([]).map_err(query_error)?;
        let mut visited = 0u64;
        while let Some(row) = rows.next().map_err(query_error)? {
            let variant = read_variant(row)?;
            visit(variant)?;
            visited += 1;
        }
        Ok(visited)
    }
}

fn read_variant(row: &rusqlite::Row<'_>) -> Result<VariantRow> {
    Ok(VariantRow {
        chrom: required_text(row, 0, "base__chrom")?,
        pos: integer(row, 1, "base__pos")?,
        pos_end: integer(row, 2, "base__pos_end")?,
        ref_base: required_text(row, 3, "base__ref_base")?,
        alt_base: required_text(row, 4, "base__alt_base")?,
        samples: optional_text(row, 5)?,
        hugo: optional_text(row, 6)?,
        transcript: optional_text(row, 7)?,
        refseq: optional_text(row, 8)?,
        so: optional_text(row, 9)?,
        achange: optional_text(row, 10)?,
        cchange: optional_text(row, 11)?,
        all_mappings: optional_text(row, 12)?,
    })
}

fn value_ref<'a>(row: &'a rusqlite::Row<'_>, idx: usize) -> Result<ValueRef<'a>> {
    row.get_ref(idx).map_err(|source| IngestError::Query {
        query: VARIANT_QUERY,
        source,
    })
}

fn optional_text(row: &rusqlite::Row<'_>, idx: usize) -> Result<Option<String>> {
    Ok(match value_ref(row, idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

fn required_text(row: &rusqlite::Row<'_>, idx: usize, column: &'static str) -> Result<String> {
    optional_text(row, idx)?.ok_or_else(|| IngestError::InvalidValue {
        column,
        value: "NULL".to_string(),
    })
}

fn integer(row: &rusqlite::Row<'_>, idx: usize, column: &'static str) -> Result<i64> {
    let invalid = |value: String| IngestError::InvalidValue { column, value };
    match value_ref(row, idx)? {
        ValueRef::Integer(value) => Ok(value),
        ValueRef::Real(value) if value.fract() == 0.0 => Ok(value as i64),
        ValueRef::Real(value) => Err(invalid(value.to_string())),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim()
                .parse::<i64>()
                .map_err(|_| invalid(text.to_string()))
        }
        ValueRef::Null => Err(invalid("NULL".to_string())),
        ValueRef::Blob(_) => Err(invalid("<blob>".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_variant(pos: &str) -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE variant (base__chrom TEXT, base__pos, base__pos_end, \
             base__ref_base TEXT, base__alt_base TEXT, tagsampler__samples TEXT, \
             base__hugo TEXT, base__transcript TEXT, base__refseq TEXT, base__so TEXT, \
             base__achange TEXT, base__cchange TEXT, base__all_mappings TEXT);
             INSERT INTO variant VALUES ('chr1', {pos}, {pos}, 'A', 'T', 'S1', NULL, \
             NULL, NULL, NULL, '', '', NULL);"
        ))
        .unwrap();
        SqliteStore::from_connection(conn)
    }

    fn collect(store: &SqliteStore) -> Result<Vec<VariantRow>> {
        let mut rows = Vec::new();
        store.visit_variants(|row| {
            rows.push(row);
            Ok::<(), IngestError>(())
        })?;
        Ok(rows)
    }

    #[test]
    fn positions_accept_integer_and_numeric_text() {
        let rows = collect(&store_with_variant("100")).unwrap();
        assert_eq!(rows[0].pos, 100);

        let rows = collect(&store_with_variant("'100'")).unwrap();
        assert_eq!(rows[0].pos_end, 100);
    }

    #[test]
    fn non_numeric_position_is_invalid() {
        let err = collect(&store_with_variant("'abc'")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidValue {
                column: "base__pos",
                ..
            }
        ));
    }

    #[test]
    fn null_text_columns_are_none() {
        let rows = collect(&store_with_variant("5")).unwrap();
        assert_eq!(rows[0].hugo, None);
        assert_eq!(rows[0].achange.as_deref(), Some(""));
    }
}
