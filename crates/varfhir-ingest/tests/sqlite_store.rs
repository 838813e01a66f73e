//! Integration tests for the SQLite annotation store.

use std::path::Path;

use rusqlite::Connection;
use tempfile::tempdir;

use varfhir_ingest::{AnnotationStore, IngestError, SqliteStore, VariantRow};

fn create_result_db(path: &Path, with_mapper: bool) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE info (colkey TEXT, colval TEXT);
         INSERT INTO info VALUES ('input_paths', '{\"0\": \"/data/in.vcf\"}');
         INSERT INTO info VALUES ('annotators', '[\"clinvar\", \"gnomad\"]');
         CREATE TABLE sample (base__uid INTEGER, base__sample_id TEXT);
         INSERT INTO sample VALUES (1, 'S1');
         INSERT INTO sample VALUES (1, 'S2');
         INSERT INTO sample VALUES (2, 'S1');
         INSERT INTO sample VALUES (3, 'S1,S2');
         INSERT INTO sample VALUES (4, NULL);
         CREATE TABLE variant (base__uid INTEGER, base__chrom TEXT, base__pos INTEGER,
             base__pos_end INTEGER, base__ref_base TEXT, base__alt_base TEXT,
             tagsampler__samples TEXT, base__hugo TEXT, base__transcript TEXT,
             base__refseq TEXT, base__so TEXT, base__achange TEXT, base__cchange TEXT,
             base__all_mappings TEXT);
         INSERT INTO variant VALUES (1, 'chr7', 140753336, 140753336, 'A', 'T', 'S1,S2',
             'BRAF', 'ENST00000646891.2', 'NM_004333.6', 'missense_variant', 'p.Val640Glu',
             'c.1919T>A', 'ENST00000288602.11:P15056:BRAF:missense_variant:p.Val600Glu:c.1799T>A');
         INSERT INTO variant VALUES (2, 'chr1', 100, 100, 'G', 'C', 'S1', NULL, NULL, NULL,
             NULL, '', ' ', '');",
    )
    .unwrap();
    if with_mapper {
        conn.execute(
            "INSERT INTO info VALUES ('mapper', 'gencode')",
            [],
        )
        .unwrap();
    }
}

#[test]
fn reads_provenance_samples_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.sqlite");
    create_result_db(&path, true);

    let store = SqliteStore::open(&path).unwrap();

    let provenance = store.provenance().unwrap();
    assert_eq!(provenance.input_paths, "{\"0\": \"/data/in.vcf\"}");
    assert_eq!(provenance.annotators, "[\"clinvar\", \"gnomad\"]");
    assert_eq!(provenance.mapper, "gencode");

    let samples = store.sample_ids().unwrap();
    assert_eq!(samples.len(), 3);
    assert!(samples.contains(&"S1".to_string()));
    assert!(samples.contains(&"S2".to_string()));
    assert!(samples.contains(&"S1,S2".to_string()));

    assert_eq!(store.variant_count().unwrap(), 2);

    let mut rows: Vec<VariantRow> = Vec::new();
    let visited = store
        .visit_variants(|row| {
            rows.push(row);
            Ok::<(), IngestError>(())
        })
        .unwrap();
    assert_eq!(visited, 2);

    let braf = &rows[0];
    assert_eq!(braf.chrom, "chr7");
    assert_eq!(braf.pos, 140_753_336);
    assert_eq!(braf.sample_names(), vec!["S1", "S2"]);
    assert_eq!(braf.hugo.as_deref(), Some("BRAF"));
    assert_eq!(braf.so.as_deref(), Some("missense_variant"));

    let bare = &rows[1];
    assert_eq!(bare.hugo, None);
    assert_eq!(bare.cchange.as_deref(), Some(" "));
}

#[test]
fn missing_provenance_key_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.sqlite");
    create_result_db(&path, false);

    let store = SqliteStore::open(&path).unwrap();
    let err = store.provenance().unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingProvenance { key: "mapper" }
    ));
}

#[test]
fn visitor_errors_stop_iteration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.sqlite");
    create_result_db(&path, true);
    let store = SqliteStore::open(&path).unwrap();

    let mut seen = 0;
    let result = store.visit_variants(|_| {
        seen += 1;
        Err(IngestError::InvalidValue {
            column: "base__chrom",
            value: "stop".to_string(),
        })
    });
    assert!(result.is_err());
    assert_eq!(seen, 1);
}

#[test]
fn opening_missing_file_fails() {
    let dir = tempdir().unwrap();
    let result = SqliteStore::open(&dir.path().join("absent.sqlite"));
    assert!(matches!(result, Err(IngestError::Open { .. })));
}
