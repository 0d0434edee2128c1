/*! Cross-run deduplication registry.

Every acceptance appends one tab-separated line to a persistent id file.
At startup the whole file is read back and the ids are kept in memory, so
a document sampled in any earlier run can never be selected again.
!*/
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Error;

/// One appended registry line. Field order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptanceRecord {
    pub sample: String,
    pub id: String,
    pub source: String,
    pub year: u16,
    pub category: String,
    pub origin: String,
}

/// Persistent set of already-sampled document ids.
pub struct DedupRegistry {
    ids: HashSet<String>,
    writer: csv::Writer<File>,
}

impl DedupRegistry {
    /// Load the registry at `path`, creating it if absent.
    ///
    /// A missing file is not an error: the registry starts empty and the
    /// file is created on open. Early registry files lack the origin
    /// column, hence the flexible reader.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let mut ids = HashSet::new();

        if path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(b'\t')
                .has_headers(false)
                .flexible(true)
                .from_path(path)?;
            for record in reader.records() {
                let record = record?;
                if let Some(id) = record.get(1) {
                    ids.insert(id.to_string());
                }
            }
            info!("loaded {} sampled ids from {:?}", ids.len(), path);
        } else {
            info!("no registry at {:?}, starting empty", path);
        }

        let handle = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(handle);

        Ok(Self { ids, writer })
    }

    /// Whether `id` was accepted in this or any previous run.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Append `record` to the persistent store and remember its id.
    ///
    /// Flushed per acceptance: an interrupted run keeps what it wrote.
    pub fn record(&mut self, record: &AcceptanceRecord) -> Result<(), Error> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.ids.insert(record.id.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AcceptanceRecord {
        AcceptanceRecord {
            sample: "sample-0".to_string(),
            id: id.to_string(),
            source: "sjmm".to_string(),
            year: 2004,
            category: "keyword:Java".to_string(),
            origin: "ads_2004.jsonl.gz".to_string(),
        }
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.tsv");
        let registry = DedupRegistry::open(&path).unwrap();
        assert!(registry.is_empty());
        // created on open
        assert!(path.exists());
    }

    #[test]
    fn test_record_then_contains() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.tsv");
        let mut registry = DedupRegistry::open(&path).unwrap();

        assert!(!registry.contains("sjmm-1"));
        registry.record(&record("sjmm-1")).unwrap();
        assert!(registry.contains("sjmm-1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.tsv");

        {
            let mut registry = DedupRegistry::open(&path).unwrap();
            registry.record(&record("sjmm-1")).unwrap();
            registry.record(&record("adecco-7")).unwrap();
        }

        let registry = DedupRegistry::open(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("sjmm-1"));
        assert!(registry.contains("adecco-7"));
        assert!(!registry.contains("x28-9"));
    }

    #[test]
    fn test_reads_five_field_lines() {
        // registries written before the origin column was added
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.tsv");
        std::fs::write(&path, "sample-0\tsjmm-3\tsjmm\t2004\tICT-term-based\n").unwrap();

        let registry = DedupRegistry::open(&path).unwrap();
        assert!(registry.contains("sjmm-3"));
    }
}
