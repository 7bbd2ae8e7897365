use std::fs;
use std::path::PathBuf;

use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use svd_recommender::{
    config::Config, data, error::LoadError, models::MovieId, services::FactorModel,
};

const MOVIES: &str = "Movie_ID,Year,Name\n\
                      1,2003,Dinosaur Planet\n\
                      2,2004,Isle of Man TT 2004 Review\n\
                      3,1997,Character\n\
                      4,1994,Paula Abdul's Get Up & Dance\n";

const RATINGS: &str = "User_ID,Rating,Movie_ID\n\
                       712664,5,3\n\
                       1331154,4,3\n\
                       2632461,3,1\n\
                       44937,5,2\n";

/// Scratch directory holding one set of startup files
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(movies: &str, ratings: &str, model: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("svd-recommender-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("movies.csv"), movies).unwrap();
        fs::write(dir.join("ratings.csv"), ratings).unwrap();
        fs::write(dir.join("model.json"), model).unwrap();
        Self { dir }
    }

    fn config(&self) -> Config {
        Config {
            movies_path: self.dir.join("movies.csv"),
            ratings_path: self.dir.join("ratings.csv"),
            model_path: self.dir.join("model.json"),
            ..Config::default()
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn test_load_engine_from_files() {
    let fixture = Fixture::new(
        MOVIES,
        RATINGS,
        r#"{"components": [[0.2, 0.9, 0.1], [0.7, 0.0, 0.6]]}"#,
    );

    let engine = assert_ok!(data::load_engine(&fixture.config()));
    assert_eq!(engine.catalog().len(), 4);
    assert_eq!(engine.columns().len(), 3);
    assert_eq!(engine.model().rank(), 2);

    // Seed column 0 (Dinosaur Planet): latent [0.8, 2.8], scores [2.12, 0.72, 1.76].
    let recs = assert_ok!(engine.recommend("dinosaur planet", 4.0, 3));
    let ids: Vec<MovieId> = recs.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![MovieId(1), MovieId(3), MovieId(2)]);
}

#[test]
fn test_unrated_catalog_entry_still_recommends() {
    let fixture = Fixture::new(
        MOVIES,
        RATINGS,
        r#"{"components": [[0.2, 0.9, 0.1], [0.7, 0.0, 0.6]]}"#,
    );

    let engine = assert_ok!(data::load_engine(&fixture.config()));
    let recs = assert_ok!(engine.recommend("Paula Abdul's Get Up & Dance", 5.0, 2));
    assert_eq!(recs.len(), 2);
}

#[test]
fn test_model_width_mismatch_is_fatal() {
    let fixture = Fixture::new(MOVIES, RATINGS, r#"{"components": [[0.2, 0.9]]}"#);

    let err = assert_err!(data::load_engine(&fixture.config()));
    assert!(matches!(err, LoadError::ModelUnavailable(_)));
}

#[test]
fn test_corrupt_model_is_fatal() {
    let fixture = Fixture::new(MOVIES, RATINGS, "{ not a model");

    let err = assert_err!(data::load_engine(&fixture.config()));
    assert!(matches!(err, LoadError::ModelUnavailable(_)));
}

#[test]
fn test_missing_catalog_is_fatal() {
    let fixture = Fixture::new(MOVIES, RATINGS, r#"{"components": [[1.0, 1.0, 1.0]]}"#);
    let config = Config {
        movies_path: fixture.dir.join("absent.csv"),
        ..fixture.config()
    };

    let err = assert_err!(data::load_engine(&config));
    assert!(matches!(err, LoadError::Io { .. }));
}
