//! Container-to-catalog ingestion

use crate::error::CatalogResult;
use crate::model::{NamedPath, PathFilter, PathParts, Timeseries};
use crate::traits::{Catalog, SeriesReader};

/// Pull a run's outputs from a container into the catalog
///
/// Each named path's string is used as a container search pattern. A path
/// that matches nothing, or more than one container series, is logged and
/// skipped. The catalog's path string and metadata win over the container's.
/// When `paths` is None, every path in the catalog is tried.
///
/// Returns the stored blocks, in path order.
pub async fn from_container(
    catalog: &dyn Catalog,
    reader: &dyn SeriesReader,
    scenario: &str,
    version: &str,
    paths: Option<Vec<NamedPath>>,
) -> CatalogResult<Vec<Timeseries>> {
    let paths = match paths {
        Some(paths) => paths,
        None => catalog.get_paths(&PathFilter::default()).await?,
    };

    let mut blocks = Vec::new();
    for path in &paths {
        let pattern = match PathParts::parse(&path.path) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(name = %path.name, error = %e, "catalog path does not parse, skipping");
                continue;
            }
        };

        let matches = reader.read_matching(&pattern)?;
        match matches.len() {
            0 => {
                tracing::warn!(name = %path.name, path = %path.path, "no container match, skipping");
            }
            1 => {
                let record = &matches[0];
                blocks.push(Timeseries {
                    scenario: scenario.to_string(),
                    version: version.to_string(),
                    path: path.path.clone(),
                    values: record.values.clone(),
                    dates: record.dates.clone(),
                    period_type: path.period_type,
                    units: path.units.clone(),
                    interval: path.interval,
                });
            }
            matched => {
                tracing::warn!(
                    name = %path.name,
                    path = %path.path,
                    matched,
                    "ambiguous container match, skipping"
                );
            }
        }
    }

    catalog.put_many_timeseries(&blocks).await
}
