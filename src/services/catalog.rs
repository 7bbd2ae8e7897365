use std::collections::HashMap;

use crate::models::{CatalogEntry, MovieId};

/// Immutable, in-memory movie catalog
///
/// Lookups never fail: an unknown name or id is simply absent.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<MovieId, usize>,
    by_name: HashMap<String, usize>,
}

impl CatalogStore {
    /// Builds the catalog, keeping the first entry seen for each movie id
    ///
    /// When several movies share a name (ignoring case), name lookup
    /// resolves to the earliest one.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut store = Self::default();

        for entry in entries {
            if store.by_id.contains_key(&entry.id) {
                tracing::warn!(movie_id = %entry.id, name = %entry.name, "Skipping duplicate catalog entry");
                continue;
            }

            let position = store.entries.len();
            store.by_id.insert(entry.id, position);
            store
                .by_name
                .entry(normalize(&entry.name))
                .or_insert(position);
            store.entries.push(entry);
        }

        store
    }

    /// Case-insensitive exact match on the movie name
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name
            .get(&normalize(name))
            .map(|&position| &self.entries[position])
    }

    pub fn get(&self, id: MovieId) -> Option<&CatalogEntry> {
        self.by_id.get(&id).map(|&position| &self.entries[position])
    }

    /// Resolves ids to entries in the order given, dropping unknown ids
    pub fn resolve_many<'a, I>(&'a self, ids: I) -> Vec<&'a CatalogEntry>
    where
        I: IntoIterator<Item = MovieId>,
    {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }

    /// All entries in load order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}
