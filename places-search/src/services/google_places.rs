// Google Places API (New) client
// Nearby search and place details over the REST surface

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{header::HeaderMap, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::search::SEARCH_FIELDS;
use shared_types::{NearbySearch, Place, RankPreference};
use tracing::debug;
use url::Url;

use super::{DetailsRequest, PlacesProvider};
use crate::config::AppConfig;
use crate::error::PlacesError;

static SEARCH_FIELD_MASK: Lazy<String> = Lazy::new(|| field_mask("places.", SEARCH_FIELDS));

#[derive(Debug, Deserialize, Default)]
struct SearchNearbyResponse {
    #[serde(default)]
    places: Vec<Place>,
}

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone())
    }

    pub fn search_url(&self) -> Result<Url, PlacesError> {
        Ok(self.base_url.join("v1/places:searchNearby")?)
    }

    pub fn details_url(&self, request: &DetailsRequest<'_>) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(&format!("v1/places/{}", urlencoding::encode(request.place_id)))?;
        url.query_pairs_mut()
            .append_pair("languageCode", request.language_code)
            .append_pair("regionCode", request.region_code);
        Ok(url)
    }

    fn headers(&self, field_mask: &str) -> Result<HeaderMap, PlacesError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "application/json".parse()?);
        headers.insert("X-Goog-Api-Key", self.api_key.parse()?);
        headers.insert("X-Goog-FieldMask", field_mask.parse()?);
        Ok(headers)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, PlacesError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await?;
        return Err(PlacesError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn search_nearby(&self, search: &NearbySearch) -> Result<Vec<Place>, PlacesError> {
        let url = self.search_url()?;
        let body = nearby_request_body(search);
        debug!(%url, %body, "Sending nearby search");

        let response = self
            .client
            .post(url)
            .headers(self.headers(&SEARCH_FIELD_MASK)?)
            .json(&body)
            .send()
            .await?;
        let result: SearchNearbyResponse = ensure_success(response).await?.json().await?;

        let mut places = result.places;
        if search.rank_preference == RankPreference::Rating {
            rank_by_rating(&mut places);
        }
        Ok(places)
    }

    async fn fetch_details(&self, request: DetailsRequest<'_>) -> Result<Place, PlacesError> {
        let url = self.details_url(&request)?;
        debug!(%url, "Fetching place details");

        let response = self
            .client
            .get(url)
            .headers(self.headers(&field_mask("", request.fields))?)
            .send()
            .await?;
        let place: Place = ensure_success(response).await?.json().await?;
        Ok(place)
    }
}

/// Comma-joined field mask, each field carrying `prefix`.
pub fn field_mask(prefix: &str, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("{prefix}{f}"))
        .collect::<Vec<String>>()
        .join(",")
}

/// Request body for `places:searchNearby`. The API has no rating rank, so a
/// rating search asks for popularity and is re-sorted by [`rank_by_rating`].
pub fn nearby_request_body(search: &NearbySearch) -> Value {
    let rank = match search.rank_preference {
        RankPreference::Distance => "DISTANCE",
        RankPreference::Popularity | RankPreference::Rating => "POPULARITY",
    };

    json!({
        "includedPrimaryTypes": search.included_primary_types,
        "maxResultCount": search.max_result_count,
        "rankPreference": rank,
        "languageCode": search.language_code,
        "regionCode": search.region_code,
        "locationRestriction": {
            "circle": {
                "center": {
                    "latitude": search.center.latitude,
                    "longitude": search.center.longitude
                },
                "radius": search.radius_meters
            }
        }
    })
}

/// Highest rating first, unrated places last. Ties keep the provider's order.
pub fn rank_by_rating(places: &mut [Place]) {
    places.sort_by(|a, b| {
        b.rating
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.rating.unwrap_or(f64::NEG_INFINITY))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::search::DETAIL_FIELDS;
    use shared_types::LocalizedText;

    fn client() -> GooglePlacesClient {
        GooglePlacesClient::new("key", Url::parse("https://places.googleapis.com/").unwrap())
    }

    fn rated(id: &str, rating: Option<f64>) -> Place {
        Place {
            id: id.to_string(),
            display_name: Some(LocalizedText::new(id)),
            rating,
            ..Default::default()
        }
    }

    #[test]
    fn search_body_carries_the_fixed_filter() {
        let body = nearby_request_body(&NearbySearch::mexico_city());

        assert_eq!(body["includedPrimaryTypes"], json!(["restaurant"]));
        assert_eq!(body["maxResultCount"], json!(5));
        assert_eq!(body["rankPreference"], json!("POPULARITY"));
        assert_eq!(body["languageCode"], json!("es-MX"));
        assert_eq!(body["regionCode"], json!("mx"));
        assert_eq!(body["locationRestriction"]["circle"]["radius"], json!(5000.0));
        assert_eq!(
            body["locationRestriction"]["circle"]["center"]["latitude"],
            json!(19.4326)
        );
    }

    #[test]
    fn distance_rank_is_passed_through() {
        let mut search = NearbySearch::mexico_city();
        search.rank_preference = RankPreference::Distance;

        assert_eq!(nearby_request_body(&search)["rankPreference"], json!("DISTANCE"));
    }

    #[test]
    fn field_masks() {
        assert!(SEARCH_FIELD_MASK.starts_with("places.displayName,places.location,"));
        assert!(SEARCH_FIELD_MASK.ends_with("places.id"));

        let details = field_mask("", DETAIL_FIELDS);
        assert!(details.contains(",regularOpeningHours,"));
        assert!(details.ends_with("addressComponents"));
        assert!(!details.contains("places."));
    }

    #[test]
    fn rating_order_is_descending_and_stable() {
        let mut places = vec![
            rated("a", Some(4.2)),
            rated("b", None),
            rated("c", Some(4.8)),
            rated("d", Some(4.2)),
        ];

        rank_by_rating(&mut places);

        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn urls_are_built_from_the_base() {
        let client = client();
        let request = DetailsRequest {
            place_id: "ChIJ a/b",
            fields: DETAIL_FIELDS,
            language_code: "es-MX",
            region_code: "mx",
        };

        assert_eq!(
            client.search_url().unwrap().as_str(),
            "https://places.googleapis.com/v1/places:searchNearby"
        );
        assert_eq!(
            client.details_url(&request).unwrap().as_str(),
            "https://places.googleapis.com/v1/places/ChIJ%20a%2Fb?languageCode=es-MX&regionCode=mx"
        );
    }

    #[test]
    fn empty_search_response_has_no_places() {
        let response: SearchNearbyResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }

    #[test]
    fn headers_carry_key_and_mask() {
        let headers = client().headers("id,rating").unwrap();

        assert_eq!(headers["X-Goog-Api-Key"], "key");
        assert_eq!(headers["X-Goog-FieldMask"], "id,rating");
    }
}
