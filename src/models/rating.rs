use serde::Deserialize;

use super::MovieId;

/// The part of a ratings history row the column layout needs
///
/// Other columns (`User_ID`, `Rating`) are skipped during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RatedMovie {
    #[serde(rename = "Movie_ID")]
    pub movie_id: MovieId,
}
