use futures::future::join_all;
use shared_types::search::DETAIL_FIELDS;
use shared_types::{MapSession, NearbySearch, Place};
use tracing::{debug, info, warn};

use crate::error::PlacesError;
use crate::services::{DetailsRequest, PlacesProvider};

/// Runs the nearby search and enriches every hit with its full field set.
pub async fn search_and_enrich<P>(
    provider: &P,
    search: &NearbySearch,
) -> Result<Vec<Place>, PlacesError>
where
    P: PlacesProvider + ?Sized,
{
    let places = provider.search_nearby(search).await?;
    info!(count = places.len(), "Nearby search returned places");

    Ok(enrich_places(provider, search, places).await)
}

/// Fetches details for all places concurrently. The output keeps the input's
/// length and order; a place whose fetch fails is passed through unchanged.
pub async fn enrich_places<P>(provider: &P, search: &NearbySearch, places: Vec<Place>) -> Vec<Place>
where
    P: PlacesProvider + ?Sized,
{
    join_all(places.into_iter().map(move |place| async move {
        let request = DetailsRequest {
            place_id: &place.id,
            fields: DETAIL_FIELDS,
            language_code: &search.language_code,
            region_code: &search.region_code,
        };
        match provider.fetch_details(request).await {
            Ok(details) => {
                debug!(place_id = %place.id, "Fetched place details");
                details.merged_over(place)
            }
            Err(e) => {
                warn!(
                    place_id = %place.id,
                    name = place.name(),
                    error = %e,
                    "Error fetching place details, keeping search result"
                );
                place
            }
        }
    }))
    .await
}

/// One search cycle against `session`. Results of a search that was
/// overtaken by a newer one are dropped instead of presented.
pub async fn run_search<P>(
    provider: &P,
    session: &mut MapSession,
    search: &NearbySearch,
) -> Result<(), PlacesError>
where
    P: PlacesProvider + ?Sized,
{
    let ticket = session.begin_search();
    let places = search_and_enrich(provider, search).await?;

    if session.present(ticket, places).is_err() {
        debug!("Discarding results of a superseded search");
    }
    Ok(())
}

/// Prints the current results table.
pub fn print_results(session: &MapSession) {
    if session.rows().is_empty() {
        println!("{}", shared_types::session::NO_RESULTS);
        return;
    }

    for (index, row) in session.rows().iter().enumerate() {
        let details: Vec<&str> = [
            row.status.as_ref().map(|s| s.label.as_str()),
            row.category.as_deref(),
            row.rating.as_deref(),
            row.price.as_deref(),
            row.address.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        println!("{}. {}", index + 1, row.title);
        for line in details {
            println!("   {line}");
        }
    }

    if let Some(bounds) = session.bounds() {
        info!(
            north = bounds.north_east.latitude,
            east = bounds.north_east.longitude,
            south = bounds.south_west.latitude,
            west = bounds.south_west.longitude,
            "Results bounds"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared_types::{LatLong, LocalizedText};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeProvider {
        results: Vec<Place>,
        failing: HashSet<String>,
        fail_search: bool,
        detail_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(results: Vec<Place>) -> Self {
            Self {
                results,
                failing: HashSet::new(),
                fail_search: false,
                detail_calls: AtomicUsize::new(0),
            }
        }

        fn failing(mut self, id: &str) -> Self {
            self.failing.insert(id.to_string());
            self
        }
    }

    #[async_trait]
    impl PlacesProvider for FakeProvider {
        async fn search_nearby(&self, _search: &NearbySearch) -> Result<Vec<Place>, PlacesError> {
            if self.fail_search {
                return Err(PlacesError::Api {
                    status: 403,
                    body: "API key not valid".to_string(),
                });
            }
            Ok(self.results.clone())
        }

        async fn fetch_details(&self, request: DetailsRequest<'_>) -> Result<Place, PlacesError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            let index = self
                .results
                .iter()
                .position(|p| p.id == request.place_id)
                .unwrap_or(0);
            // Earlier places finish later so completion order is reversed.
            let delay = (self.results.len() - index) as u64 * 5;
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if self.failing.contains(request.place_id) {
                return Err(PlacesError::Api {
                    status: 500,
                    body: "backend error".to_string(),
                });
            }
            Ok(Place {
                website_uri: Some(format!("https://{}.example.mx", request.place_id)),
                national_phone_number: Some("55 1234 5678".to_string()),
                ..Default::default()
            })
        }
    }

    fn summary(id: &str, rating: f64) -> Place {
        Place {
            id: id.to_string(),
            display_name: Some(LocalizedText::new(format!("Restaurante {id}"))),
            location: Some(LatLong::new(19.43, -99.13)),
            rating: Some(rating),
            ..Default::default()
        }
    }

    fn five_ranked() -> Vec<Place> {
        vec![
            summary("p1", 4.9),
            summary("p2", 4.8),
            summary("p3", 4.7),
            summary("p4", 4.6),
            summary("p5", 4.5),
        ]
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn enrichment_keeps_length_and_order() {
        let provider = FakeProvider::new(five_ranked());

        let enriched = search_and_enrich(&provider, &NearbySearch::mexico_city())
            .await
            .unwrap();

        assert_eq!(ids(&enriched), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(provider.detail_calls.load(Ordering::SeqCst), 5);
        assert!(enriched.iter().all(|p| p.website_uri.is_some()));
        assert_eq!(enriched[0].name(), "Restaurante p1");
        assert_eq!(enriched[0].rating, Some(4.9));
    }

    #[tokio::test]
    async fn failed_enrichment_degrades_one_item() {
        let provider = FakeProvider::new(five_ranked()).failing("p3");

        let enriched = search_and_enrich(&provider, &NearbySearch::mexico_city())
            .await
            .unwrap();

        assert_eq!(ids(&enriched), vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(enriched[2], summary("p3", 4.7));
        assert!(enriched[3].website_uri.is_some());
    }

    #[tokio::test]
    async fn search_failure_presents_nothing() {
        let mut provider = FakeProvider::new(five_ranked());
        provider.fail_search = true;
        let mut session = MapSession::new();

        let result = run_search(&provider, &mut session, &NearbySearch::mexico_city()).await;

        assert!(matches!(result, Err(PlacesError::Api { status: 403, .. })));
        assert!(!session.has_presented());
        assert!(session.markers().is_empty());
        assert_eq!(provider.detail_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_searches_do_not_accumulate_markers() {
        let mut session = MapSession::new();
        let search = NearbySearch::mexico_city();

        run_search(&FakeProvider::new(five_ranked()), &mut session, &search)
            .await
            .unwrap();
        run_search(
            &FakeProvider::new(vec![summary("q1", 4.4), summary("q2", 4.1)]),
            &mut session,
            &search,
        )
        .await
        .unwrap();

        assert_eq!(session.markers().len(), 2);
        assert_eq!(session.rows().len(), 2);
    }

    #[tokio::test]
    async fn five_results_end_to_end() {
        let provider = FakeProvider::new(five_ranked());
        let mut session = MapSession::new();

        run_search(&provider, &mut session, &NearbySearch::mexico_city())
            .await
            .unwrap();

        assert_eq!(session.rows().len(), 5);
        assert_eq!(session.rows()[0].rating.as_deref(), Some("⭐ 4.9 (0 reviews)"));
        assert!(session.can_export());
        let csv = shared_types::places_to_csv(session.places()).unwrap();
        assert_eq!(csv.lines().count(), 6);
    }
}
