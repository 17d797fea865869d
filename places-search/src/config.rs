use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::PlacesError;

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/";

/// Runtime settings read from the environment (and `.env`, once loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: Url,
    pub export_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, PlacesError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PlacesError> {
        let api_key = lookup("GOOGLE_PLACES_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(PlacesError::MissingApiKey)?;

        let mut base_url = lookup("PLACES_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last path segment unless the base ends in a slash
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let export_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_key,
            base_url: Url::parse(&base_url)?,
            export_dir,
        })
    }
}
