//! Pre-fitted latent factor model
//!
//! The engine only needs two capabilities from a fitted model: projecting a
//! dense rating vector into latent space, and mapping a latent vector back to
//! one score per column. [`TruncatedSvd`] is the production implementation;
//! tests substitute their own.

use std::io::Read;
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;

use crate::error::LoadError;

/// Point in the model's k-dimensional latent space
pub type LatentVector = Array1<f64>;

/// One score per column position
pub type ScoreVector = Array1<f64>;

/// Capabilities the recommendation engine requires from a fitted model
///
/// Implementations are immutable after load and shared across threads.
#[cfg_attr(test, mockall::automock)]
pub trait FactorModel: Send + Sync {
    /// Latent dimensionality k
    fn rank(&self) -> usize;

    /// Length of the rating vectors this model accepts
    fn n_features(&self) -> usize;

    /// Projects a dense rating vector of length `n_features()` into latent space
    fn project(&self, query: &[f64]) -> LatentVector;

    /// Maps a latent vector back to `n_features()` scores
    fn reconstruct_scores(&self, latent: &LatentVector) -> ScoreVector;
}

/// Truncated SVD basis: a `k × n` matrix whose rows are the latent components
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    components: Array2<f64>,
}

#[derive(Debug, Deserialize)]
struct SvdArtifact {
    components: Vec<Vec<f64>>,
}

impl TruncatedSvd {
    pub fn new(components: Array2<f64>) -> Result<Self, LoadError> {
        let (rank, n_features) = components.dim();
        if rank == 0 || n_features == 0 {
            return Err(LoadError::ModelUnavailable(format!(
                "components matrix is empty ({rank} x {n_features})"
            )));
        }
        if components.iter().any(|v| !v.is_finite()) {
            return Err(LoadError::ModelUnavailable(
                "components matrix contains non-finite values".to_string(),
            ));
        }
        Ok(Self { components })
    }

    /// Builds the model from row-major component vectors
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let rank = rows.len();
        let n_features = rows.first().map(Vec::len).unwrap_or(0);

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(LoadError::ModelUnavailable(format!(
                "component row {i} has {} values, expected {n_features}",
                row.len()
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let components = Array2::from_shape_vec((rank, n_features), flat)
            .map_err(|e| LoadError::ModelUnavailable(e.to_string()))?;
        Self::new(components)
    }

    /// Reads a JSON artifact of the form `{"components": [[...], ...]}`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let artifact: SvdArtifact = serde_json::from_reader(reader)
            .map_err(|e| LoadError::ModelUnavailable(format!("malformed model artifact: {e}")))?;
        Self::from_rows(artifact.components)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            LoadError::ModelUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl FactorModel for TruncatedSvd {
    fn rank(&self) -> usize {
        self.components.nrows()
    }

    fn n_features(&self) -> usize {
        self.components.ncols()
    }

    fn project(&self, query: &[f64]) -> LatentVector {
        debug_assert_eq!(query.len(), self.n_features());
        self.components.dot(&ArrayView1::from(query))
    }

    fn reconstruct_scores(&self, latent: &LatentVector) -> ScoreVector {
        debug_assert_eq!(latent.len(), self.rank());
        self.components.t().dot(latent)
    }
}
