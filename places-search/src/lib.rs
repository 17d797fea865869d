pub mod actions;
pub mod config;
pub mod error;
pub mod services;

pub use actions::nearby_search::driver::{enrich_places, run_search, search_and_enrich};
pub use config::AppConfig;
pub use error::PlacesError;
pub use services::google_places::GooglePlacesClient;
pub use services::PlacesProvider;
