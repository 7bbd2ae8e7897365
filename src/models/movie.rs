use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// Numeric movie identifier as it appears in the catalog and ratings data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MovieId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Free-form display fields carried alongside a catalog entry (year, genre, ...)
///
/// Keys are lowercased column names. Absent fields are left absent here;
/// defaults are filled in by the HTTP layer.
pub type Metadata = BTreeMap<String, String>;

/// A movie known to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub name: String,
    pub metadata: Metadata,
}

impl CatalogEntry {
    pub fn new(id: impl Into<MovieId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attaches a metadata field, replacing any previous value for the key
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A ranked movie returned by the recommendation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "Movie_ID")]
    pub movie_id: MovieId,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<&CatalogEntry> for Recommendation {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            movie_id: entry.id,
            name: entry.name.clone(),
        }
    }
}
