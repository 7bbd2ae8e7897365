use std::cmp::Ordering;
use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::{LoadError, RecommendError},
    models::Recommendation,
    services::{CatalogStore, ColumnIndex, FactorModel},
};

/// Default number of recommendations when the caller does not ask for a specific count
pub const DEFAULT_TOP_N: i64 = 5;

/// Single-seed recommendation engine over a pre-fitted factor model
///
/// Holds the catalog, the column layout and the model, all immutable after
/// construction. One instance is built at startup and shared by every request;
/// each call allocates only its own query and score vectors.
pub struct RecommendationEngine {
    catalog: CatalogStore,
    columns: ColumnIndex,
    model: Arc<dyn FactorModel>,
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("catalog_size", &self.catalog.len())
            .field("columns", &self.columns.len())
            .field("rank", &self.model.rank())
            .finish()
    }
}

impl RecommendationEngine {
    /// Assembles the engine, checking the model against the column layout
    ///
    /// A model whose input width differs from the number of rated movies cannot
    /// score this catalog, so it is reported as unavailable.
    pub fn new(
        catalog: CatalogStore,
        columns: ColumnIndex,
        model: Arc<dyn FactorModel>,
    ) -> Result<Self, LoadError> {
        if model.n_features() != columns.len() {
            return Err(LoadError::ModelUnavailable(format!(
                "model expects {} columns but ratings history has {}",
                model.n_features(),
                columns.len()
            )));
        }

        Ok(Self {
            catalog,
            columns,
            model,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn columns(&self) -> &ColumnIndex {
        &self.columns
    }

    pub fn model(&self) -> &dyn FactorModel {
        self.model.as_ref()
    }

    /// Recommends up to `top_n` movies for someone who gave `seed_rating` to `seed_name`
    ///
    /// The seed is matched case-insensitively. A seed with no ratings history
    /// still produces a ranking, from an all-zero query vector. The seed itself
    /// is not excluded from its own results. `top_n <= 0` yields an empty list.
    #[instrument(level = "debug", skip(self))]
    pub fn recommend(
        &self,
        seed_name: &str,
        seed_rating: f64,
        top_n: i64,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let seed = self
            .catalog
            .find_by_name(seed_name)
            .ok_or_else(|| RecommendError::NotFound {
                name: seed_name.to_string(),
            })?;

        let top_n = match usize::try_from(top_n) {
            Ok(n) if n > 0 => n,
            _ => return Ok(Vec::new()),
        };

        let mut query = vec![0.0; self.columns.len()];
        match self.columns.column_of(seed.id) {
            Some(column) => {
                tracing::debug!(movie_id = %seed.id, column, "Seeding query vector");
                query[column] = seed_rating;
            }
            None => {
                tracing::warn!(
                    movie_id = %seed.id,
                    name = %seed.name,
                    "Seed movie has no ratings history, using an all-zero query"
                );
            }
        }

        let latent = self.model.project(&query);
        let scores = self.model.reconstruct_scores(&latent).to_vec();

        let ranked = rank_columns(&scores, top_n);
        let ids = ranked
            .into_iter()
            .filter_map(|position| self.columns.item_at(position));

        let recommendations: Vec<Recommendation> = self
            .catalog
            .resolve_many(ids)
            .into_iter()
            .map(Recommendation::from)
            .collect();

        tracing::debug!(count = recommendations.len(), "Recommendations ranked");

        Ok(recommendations)
    }
}

/// Column positions of the `top_n` highest scores, best first
///
/// Ties go to the lower column position and NaN scores rank last, so the
/// order is fully determined by the scores.
pub fn rank_columns(scores: &[f64], top_n: usize) -> Vec<usize> {
    let compare = |&a: &usize, &b: &usize| by_score_desc(scores[a], scores[b]).then(a.cmp(&b));

    let mut positions: Vec<usize> = (0..scores.len()).collect();
    if top_n < positions.len() {
        positions.select_nth_unstable_by(top_n, compare);
        positions.truncate(top_n);
    }
    positions.sort_unstable_by(compare);
    positions
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
