use serde::{Deserialize, Serialize};

use crate::place::LatLong;

/// Attributes requested by the nearby search.
pub const SEARCH_FIELDS: &[&str] = &[
    "displayName",
    "location",
    "businessStatus",
    "rating",
    "priceLevel",
    "formattedAddress",
    "types",
    "userRatingCount",
    "primaryTypeDisplayName",
    "id",
];

/// Attributes requested when enriching a single search result.
pub const DETAIL_FIELDS: &[&str] = &[
    "id",
    "displayName",
    "formattedAddress",
    "shortFormattedAddress",
    "location",
    "rating",
    "userRatingCount",
    "priceLevel",
    "types",
    "primaryTypeDisplayName",
    "businessStatus",
    "nationalPhoneNumber",
    "internationalPhoneNumber",
    "websiteUri",
    "googleMapsUri",
    "regularOpeningHours",
    "currentOpeningHours",
    "editorialSummary",
    "takeout",
    "delivery",
    "dineIn",
    "curbsidePickup",
    "reservable",
    "servesBreakfast",
    "servesLunch",
    "servesDinner",
    "servesBeer",
    "servesWine",
    "servesBrunch",
    "servesVegetarianFood",
    "outdoorSeating",
    "menuForChildren",
    "addressComponents",
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RankPreference {
    Popularity,
    Distance,
    Rating,
}

/// Nearby search parameters. The deployment only ever uses [`NearbySearch::mexico_city`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NearbySearch {
    pub center: LatLong,
    pub radius_meters: f64,
    pub included_primary_types: Vec<String>,
    pub max_result_count: u8,
    pub rank_preference: RankPreference,
    pub language_code: String,
    pub region_code: String,
}

pub const MEXICO_CITY_CENTER: LatLong = LatLong {
    latitude: 19.4326,
    longitude: -99.1332,
};

pub const DEFAULT_ZOOM: f64 = 12.0;

impl NearbySearch {
    pub fn mexico_city() -> Self {
        Self {
            center: MEXICO_CITY_CENTER,
            radius_meters: 5000.0,
            included_primary_types: vec!["restaurant".to_string()],
            max_result_count: 5,
            rank_preference: RankPreference::Rating,
            language_code: "es-MX".to_string(),
            region_code: "mx".to_string(),
        }
    }
}

impl Default for NearbySearch {
    fn default() -> Self {
        Self::mexico_city()
    }
}
