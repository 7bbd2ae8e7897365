//! Startup-time loading of the catalog, ratings history and factor model
//!
//! Everything here runs once, before the server accepts connections. Any
//! failure is fatal and is reported as a [`LoadError`].

pub mod catalog;
pub mod ratings;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::{
    config::Config,
    error::LoadError,
    services::{CatalogStore, FactorModel, RecommendationEngine, TruncatedSvd},
};

pub use catalog::{load_catalog, read_catalog};
pub use ratings::{build_column_index, load_column_index};

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Loads every startup artifact named in `config` and assembles the engine
pub fn load_engine(config: &Config) -> Result<RecommendationEngine, LoadError> {
    let catalog = CatalogStore::new(load_catalog(&config.movies_path)?);
    tracing::info!(
        path = %config.movies_path.display(),
        movies = catalog.len(),
        "Catalog loaded"
    );

    let columns = load_column_index(&config.ratings_path)?;
    tracing::info!(
        path = %config.ratings_path.display(),
        columns = columns.len(),
        "Column index built"
    );

    let model = TruncatedSvd::from_path(&config.model_path)?;
    tracing::info!(
        path = %config.model_path.display(),
        rank = model.rank(),
        features = model.n_features(),
        "Factor model loaded"
    );

    RecommendationEngine::new(catalog, columns, Arc::new(model))
}
