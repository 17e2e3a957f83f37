use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use estate_core::schema::{self, CategoryColumn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::row::{ReferenceRow, REQUIRED_COLUMNS};
use crate::{DatasetError, Result};

/// The in-memory reference dataset. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    rows: Vec<ReferenceRow>,
}

impl ReferenceDataset {
    pub fn from_rows(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    /// Open the zip archive at `path` and parse the CSV stored as `entry`.
    pub fn load_archive(path: &Path, entry: &str) -> Result<Self> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let csv_entry = archive.by_name(entry).map_err(|e| match e {
            ZipError::FileNotFound => DatasetError::MissingEntry {
                path: path.to_path_buf(),
                entry: entry.to_string(),
            },
            other => DatasetError::Archive(other),
        })?;

        let dataset = Self::from_csv_reader(csv_entry)?;
        tracing::info!(
            path = %path.display(),
            entry,
            rows = dataset.len(),
            "reference dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse CSV with a header row. Every required column must be present.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(DatasetError::MissingColumn(required));
            }
        }

        let rows = reader
            .deserialize::<ReferenceRow>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted, deduplicated values observed in a categorical column.
    pub fn distinct_values(&self, column: CategoryColumn) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.category(column))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Names of the placeholder columns (`Nearby_Schools`, `Nearby_Hospitals`)
    /// for which the dataset carries more than one distinct value.
    pub fn placeholder_variation(&self) -> Vec<&'static str> {
        let mut varying = Vec::new();
        if varies(self.rows.iter().filter_map(|r| r.nearby_schools)) {
            varying.push(schema::NEARBY_SCHOOLS);
        }
        if varies(self.rows.iter().filter_map(|r| r.nearby_hospitals)) {
            varying.push(schema::NEARBY_HOSPITALS);
        }
        varying
    }
}

fn varies(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.any(|v| v != first),
        None => false,
    }
}
