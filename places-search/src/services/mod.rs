pub mod google_places;

use async_trait::async_trait;
use shared_types::{NearbySearch, Place};

use crate::error::PlacesError;

/// Per-place detail lookup.
#[derive(Debug, Clone, Copy)]
pub struct DetailsRequest<'a> {
    pub place_id: &'a str,
    pub fields: &'a [&'a str],
    pub language_code: &'a str,
    pub region_code: &'a str,
}

/// A places backend able to run a nearby search and fetch a place's full fields.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places within the search radius, already in the requested rank order.
    async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<Place>, PlacesError>;

    async fn fetch_details(&self, request: DetailsRequest<'_>) -> Result<Place, PlacesError>;
}
