//! Document finalization: one JSON bundle per sample.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};
use varfhir_core::{ReportOptions, SampleRegistry};
use varfhir_model::{Bundle, Resource};

use crate::error::{ReportError, Result};

const DOCUMENT_EXTENSION: &str = "fhir.json";

/// Where and how documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Path prefix; each file is `<prefix>__<sample>.<scope>.fhir.json`.
    pub prefix: PathBuf,
    /// Selects the `all` scope suffix instead of `primary`.
    pub all_transcripts: bool,
}

impl OutputConfig {
    pub fn new(prefix: impl Into<PathBuf>, options: &ReportOptions) -> Self {
        Self {
            prefix: prefix.into(),
            all_transcripts: options.all_transcripts,
        }
    }

    /// `all` or `primary`.
    pub fn scope(&self) -> &'static str {
        if self.all_transcripts { "all" } else { "primary" }
    }

    /// Output path for one sample.
    ///
    /// Path separators in the sample name are replaced so every document
    /// lands next to the prefix.
    pub fn document_path(&self, sample: &str) -> PathBuf {
        let sample = sample.replace(['/', '\\'], "_");
        let mut name = OsString::from(self.prefix.as_os_str());
        name.push(format!("__{sample}.{}.{DOCUMENT_EXTENSION}", self.scope()));
        PathBuf::from(name)
    }
}

/// A document written by [`finalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub sample: String,
    pub path: PathBuf,
    /// Bundle entries, subject included.
    pub entries: usize,
}

/// Attach each sample's entries to its document and write it out.
///
/// Samples are written in registry order, including those with no rows.
/// Every output path is checked before the first write, so two samples whose
/// names map to the same file fail the run without touching the disk. After
/// that the first failure aborts; documents already written stay in place.
pub fn finalize(registry: SampleRegistry, config: &OutputConfig) -> Result<Vec<WrittenDocument>> {
    let span = info_span!("finalize", samples = registry.len(), scope = config.scope());
    let _guard = span.enter();

    let paths = document_paths(&registry, config)?;

    let mut written = Vec::with_capacity(registry.len());
    let samples = registry.into_samples().into_iter().zip(paths);
    for (index, (sample, path)) in samples.enumerate() {
        let name = sample.name().to_string();

        let mut bundle = Bundle::collection(sample.document_id().to_string());
        bundle.entry = sample.into_entries();
        let entries = bundle.entry.len();

        let mut bytes = serde_json::to_vec_pretty(&Resource::Bundle(bundle)).map_err(|source| {
            ReportError::Serialization {
                sample: name.clone(),
                source,
            }
        })?;
        bytes.push(b'\n');

        write_atomic(&path, &bytes)?;
        debug!(index, entries, "document written");

        written.push(WrittenDocument {
            sample: name,
            path,
            entries,
        });
    }

    info!(documents = written.len(), "documents finalized");
    Ok(written)
}

/// Output path of every sample, in registry order.
fn document_paths(registry: &SampleRegistry, config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let mut owners: HashMap<PathBuf, &str> = HashMap::with_capacity(registry.len());
    let mut paths = Vec::with_capacity(registry.len());
    for sample in registry.iter() {
        let path = config.document_path(sample.name());
        if let Some(first) = owners.insert(path.clone(), sample.name()) {
            return Err(ReportError::PathCollision {
                path,
                first: first.to_string(),
                second: sample.name().to_string(),
            });
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Write `bytes` to `path` through a sibling temp file.
///
/// The temp file is synced before the rename and removed on any failure, so
/// `path` either keeps its old content or holds the complete new document.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, bytes).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| ReportError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |operation| {
        move |source| ReportError::Io {
            operation,
            path: temp_path.to_path_buf(),
            source,
        }
    };

    let mut file = File::create(temp_path).map_err(io_error("create"))?;
    file.write_all(bytes).map_err(io_error("write"))?;
    file.sync_all().map_err(io_error("sync"))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn document_paths_follow_scope() {
        let primary = OutputConfig::new("/out/run", &ReportOptions::default());
        assert_eq!(
            primary.document_path("S1"),
            PathBuf::from("/out/run__S1.primary.fhir.json")
        );

        let all = OutputConfig::new(
            "/out/run",
            &ReportOptions::default().with_all_transcripts(true),
        );
        assert_eq!(
            all.document_path("S1"),
            PathBuf::from("/out/run__S1.all.fhir.json")
        );
    }

    #[test]
    fn separators_in_sample_names_are_replaced() {
        let config = OutputConfig::new("/out/run", &ReportOptions::default());
        assert_eq!(
            config.document_path("batch/S1"),
            PathBuf::from("/out/run__batch_S1.primary.fhir.json")
        );
    }

    #[test]
    fn colliding_sample_names_fail_before_writing() {
        let dir = tempdir().unwrap();
        let run = varfhir_core::RunContext::from_seed("seedval");
        let registry = SampleRegistry::from_names(
            ["a/b", "a_b"],
            &run,
            varfhir_core::DocumentIdScheme::Provenance,
        );
        let config = OutputConfig::new(dir.path().join("run"), &ReportOptions::default());

        let err = finalize(registry, &config).unwrap_err();
        match err {
            ReportError::PathCollision {
                path,
                first,
                second,
            } => {
                assert_eq!(path, dir.path().join("run__a_b.primary.fhir.json"));
                assert_eq!(first, "a/b");
                assert_eq!(second, "a_b");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        write_atomic(&path, b"{}\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn write_atomic_failure_cleans_up() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes the rename fail.
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let err = write_atomic(&path, b"{}").unwrap_err();
        assert!(matches!(err, ReportError::AtomicWriteFailed { .. }));
        assert!(!temp_path_for(&path).exists());
    }
}
