//! Movie recommendations from a single seed movie and rating, scored by a
//! pre-fitted truncated SVD model and served over HTTP.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
