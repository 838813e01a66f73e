//! Sample names stay out of log output unless data logging is enabled.

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::tempdir;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use varfhir_cli::logging::REDACTED_VALUE;
use varfhir_cli::pipeline::{ReportRequest, run_report};
use varfhir_core::ReportOptions;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn create_result_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE info (colkey TEXT, colval TEXT);
         INSERT INTO info VALUES ('input_paths', '{\"0\": \"/data/in.vcf\"}');
         INSERT INTO info VALUES ('annotators', '[\"clinvar\"]');
         INSERT INTO info VALUES ('mapper', 'gencode');
         CREATE TABLE sample (base__uid INTEGER, base__sample_id TEXT);
         INSERT INTO sample VALUES (1, 'ALICE-0042');
         CREATE TABLE variant (base__uid INTEGER, base__chrom TEXT, base__pos INTEGER,
             base__pos_end INTEGER, base__ref_base TEXT, base__alt_base TEXT,
             tagsampler__samples TEXT, base__hugo TEXT, base__transcript TEXT,
             base__refseq TEXT, base__so TEXT, base__achange TEXT, base__cchange TEXT,
             base__all_mappings TEXT);
         INSERT INTO variant VALUES (1, 'chr1', 100, 100, 'A', 'T', 'ALICE-0042,BOB-0007',
             NULL, NULL, NULL, 'missense_variant', NULL, NULL, NULL);",
    )
    .unwrap();
}

#[test]
fn sample_names_are_redacted_at_every_level() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("run.sqlite");
    create_result_db(&db);

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        run_report(&ReportRequest::new(&db, ReportOptions::default()))
    })
    .unwrap();
    assert_eq!(result.documents.len(), 1);
    assert!(
        result.documents[0]
            .path
            .to_string_lossy()
            .contains("ALICE-0042")
    );

    let text = logs.text();
    assert!(text.contains("document written"));
    assert!(text.contains(REDACTED_VALUE));
    assert!(!text.contains("ALICE-0042"), "sample name leaked:\n{text}");
    assert!(!text.contains("BOB-0007"), "sample name leaked:\n{text}");
}
