use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::{error::LoadError, models::RatedMovie, services::ColumnIndex};

/// Builds the column layout from the ratings CSV at `path`
pub fn load_column_index(path: impl AsRef<Path>) -> Result<ColumnIndex, LoadError> {
    build_column_index(super::open(path.as_ref())?)
}

/// Streams ratings rows into a [`ColumnIndex`] without keeping them in memory
///
/// Only the `Movie_ID` column is read; columns may appear in any order.
pub fn build_column_index<R: Read>(reader: R) -> Result<ColumnIndex, LoadError> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut rows = 0usize;
    let mut movie_ids = BTreeSet::new();
    for row in csv.deserialize::<RatedMovie>() {
        movie_ids.insert(row?.movie_id);
        rows += 1;
    }

    tracing::debug!(rows, movies = movie_ids.len(), "Ratings scanned");
    Ok(ColumnIndex::from_movie_ids(movie_ids))
}
