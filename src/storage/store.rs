// src/storage/store.rs
use crate::domain::id::{derived_record_id, is_valid_record_id};
use crate::domain::PropertyRecord;
use csv::{ReaderBuilder, WriterBuilder};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Column order of the backing file. Must match the field order of
/// `PropertyRecord`, which is what `csv` serializes by.
pub const COLUMNS: [&str; 12] = [
    "Address",
    "SizeSqM",
    "Bedrooms",
    "Bathrooms",
    "RentPrice",
    "Notes",
    "Quality",
    "VisitDate",
    "Latitude",
    "Longitude",
    "SourceURL",
    "Id",
];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The only reader and writer of the persisted collection.
///
/// Every call reads or rewrites the whole file. There is no locking: with two
/// writers the last save wins.
#[derive(Clone, Debug)]
pub struct PropertyStore {
    path: PathBuf,
}

impl PropertyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection. A missing file is an empty collection.
    ///
    /// Never writes. Rows without a usable id get one derived from their
    /// position and content; it reaches the file with the next `save`.
    pub fn load(&self) -> Result<Vec<PropertyRecord>, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No data file yet, starting empty");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let mut records = Vec::new();
        let mut derived = 0usize;

        for (position, row) in reader.records().enumerate() {
            let row = row?;
            let mut record: PropertyRecord = row.deserialize(Some(&headers))?;
            if !is_valid_record_id(&record.id) {
                record.id = derived_record_id(position, row.iter().map(str::as_bytes));
                derived += 1;
            }
            records.push(record);
        }

        if derived > 0 {
            tracing::debug!(derived, "Rows without a stored id");
        }

        Ok(records)
    }

    /// Overwrite the backing file with `records`.
    ///
    /// Rows go to a temporary file in the same directory which then replaces
    /// the original, so readers never see a half-written file.
    pub fn save(&self, records: &[PropertyRecord]) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            writer.write_record(COLUMNS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush().map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::debug!(path = %self.path.display(), rows = records.len(), "Collection saved");
        Ok(())
    }
}
