use std::collections::{BTreeSet, HashMap};

use crate::models::MovieId;

/// Dense column layout over every movie that appears in the ratings history
///
/// Positions are assigned in ascending movie id order, matching a
/// user × movie pivot table. Built once at startup and read-only after.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    columns: Vec<MovieId>,
    positions: HashMap<MovieId, usize>,
}

impl ColumnIndex {
    /// Builds the layout from the movie ids of historical ratings
    ///
    /// Only the set of distinct ids matters; repeats collapse to one column.
    pub fn from_movie_ids(ids: impl IntoIterator<Item = MovieId>) -> Self {
        let columns: Vec<MovieId> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let positions = columns
            .iter()
            .enumerate()
            .map(|(position, &id)| (id, position))
            .collect();

        Self { columns, positions }
    }

    /// Column of a movie, or `None` when it has no ratings history
    pub fn column_of(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Inverse of [`column_of`](Self::column_of)
    pub fn item_at(&self, position: usize) -> Option<MovieId> {
        self.columns.get(position).copied()
    }

    /// Length shared by every query and score vector
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_sorted_by_movie_id() {
        let index = ColumnIndex::from_movie_ids([MovieId(30), MovieId(10), MovieId(20)]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.column_of(MovieId(10)), Some(0));
        assert_eq!(index.column_of(MovieId(20)), Some(1));
        assert_eq!(index.column_of(MovieId(30)), Some(2));
    }

    #[test]
    fn test_repeated_movies_share_one_column() {
        let index = ColumnIndex::from_movie_ids([MovieId(5), MovieId(5), MovieId(5)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.column_of(MovieId(5)), Some(0));
    }

    #[test]
    fn test_unrated_movie_has_no_column() {
        let index = ColumnIndex::from_movie_ids([MovieId(1), MovieId(2)]);
        assert_eq!(index.column_of(MovieId(3)), None);
    }

    #[test]
    fn test_item_at_inverts_column_of() {
        let index = ColumnIndex::from_movie_ids([MovieId(8), MovieId(4), MovieId(6)]);
        for position in 0..index.len() {
            let id = index.item_at(position).unwrap();
            assert_eq!(index.column_of(id), Some(position));
        }
        assert_eq!(index.item_at(index.len()), None);
    }

    #[test]
    fn test_empty_history() {
        let index = ColumnIndex::from_movie_ids(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
