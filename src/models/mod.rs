mod movie;
mod rating;

pub use movie::{CatalogEntry, Metadata, MovieId, Recommendation};
pub use rating::RatedMovie;
