use serde::Deserialize;
use std::path::PathBuf;

use crate::services::DEFAULT_TOP_N;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog CSV (`Movie_ID`, `Name`, optional display columns)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Ratings history CSV (`User_ID`, `Movie_ID`, `Rating`)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Fitted factor model artifact (JSON components matrix)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Number of recommendations returned when a request does not specify one
    #[serde(default = "default_recommendations")]
    pub default_recommendations: i64,

    /// Attach a permissive CORS layer to every route
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/Netflix_Dataset_Movie.csv")
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("data/Netflix_Dataset_Rating.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("data/svd_model.json")
}

fn default_recommendations() -> i64 {
    DEFAULT_TOP_N
}

fn default_enable_cors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            movies_path: default_movies_path(),
            ratings_path: default_ratings_path(),
            model_path: default_model_path(),
            default_recommendations: default_recommendations(),
            enable_cors: default_enable_cors(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.default_recommendations, 5);
        assert!(config.enable_cors);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_env_overrides() {
        let vars = vec![
            ("PORT".to_string(), "9090".to_string()),
            ("MODEL_PATH".to_string(), "/models/svd.json".to_string()),
            ("DEFAULT_RECOMMENDATIONS".to_string(), "10".to_string()),
            ("ENABLE_CORS".to_string(), "false".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.model_path, PathBuf::from("/models/svd.json"));
        assert_eq!(config.default_recommendations, 10);
        assert!(!config.enable_cors);
    }
}
