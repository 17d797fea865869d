#[cfg(feature = "ssr")]
use places_search::{AppConfig, GooglePlacesClient, PlacesError};
#[cfg(feature = "ssr")]
use std::sync::OnceLock;

#[cfg(feature = "ssr")]
static PLACES_CLIENT: OnceLock<GooglePlacesClient> = OnceLock::new();

#[cfg(feature = "ssr")]
pub fn init_client() -> Result<(), PlacesError> {
    let config = AppConfig::from_env()?;

    if PLACES_CLIENT
        .set(GooglePlacesClient::from_config(&config))
        .is_err()
    {
        tracing::warn!("Places client already initialized");
    }

    Ok(())
}

#[cfg(feature = "ssr")]
pub fn get_client() -> Option<&'static GooglePlacesClient> {
    PLACES_CLIENT.get()
}
