//! JSON timeseries container reader

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::model::PathParts;
use crate::traits::{SeriesRecord, SeriesReader};

/// Top-level shape of a JSON container document
#[derive(Debug, Deserialize)]
struct ContainerDocument {
    series: Vec<SeriesRecord>,
}

/// A JSON container document opened from disk
///
/// The reference container format. Binary container readers live outside
/// this crate and implement the same trait.
pub struct JsonSeriesFile {
    series: Vec<SeriesRecord>,
}

impl JsonSeriesFile {
    /// Open and parse a container document
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            CatalogError::External(format!("container {}: {}", path.as_ref().display(), e))
        })?;
        let doc: ContainerDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CatalogError::External(format!("container document: {}", e)))?;
        Ok(Self { series: doc.series })
    }

    /// Wrap already-loaded records (for testing)
    pub fn from_records(series: Vec<SeriesRecord>) -> Self {
        Self { series }
    }
}

impl SeriesReader for JsonSeriesFile {
    fn read_matching(&self, pattern: &PathParts) -> CatalogResult<Vec<SeriesRecord>> {
        let matcher = pattern.matcher()?;

        let mut found = Vec::new();
        for record in &self.series {
            let parts = match PathParts::parse(&record.path) {
                Ok(parts) => parts,
                Err(e) => {
                    tracing::warn!(path = %record.path, error = %e, "unparseable container path, skipping");
                    continue;
                }
            };
            if matcher.matches(&parts) {
                found.push(record.clone());
            }
        }
        Ok(found)
    }
}
