pub mod catalog;
pub mod column_index;
pub mod factor_model;
pub mod recommendations;

pub use catalog::CatalogStore;
pub use column_index::ColumnIndex;
pub use factor_model::{FactorModel, LatentVector, ScoreVector, TruncatedSvd};
pub use recommendations::{RecommendationEngine, DEFAULT_TOP_N};
