use leptos::prelude::*;
use leptos::server;
use shared_types::Place;

/// Nearby restaurants around the fixed center, each enriched with its full
/// field set. Places whose detail fetch failed come back with search fields only.
#[server]
pub async fn search_restaurants() -> Result<Vec<Place>, ServerFnError> {
    use places_search::search_and_enrich;
    use shared_types::NearbySearch;

    let client = crate::provider::get_client()
        .ok_or_else(|| ServerFnError::new("Places client not initialized"))?;

    match search_and_enrich(client, &NearbySearch::mexico_city()).await {
        Ok(places) => Ok(places),
        Err(e) => {
            tracing::error!(error = %e, "Error searching places");
            Err(ServerFnError::new(format!("Search error: {}", e)))
        }
    }
}
