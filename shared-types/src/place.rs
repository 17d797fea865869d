use serde::{Deserialize, Serialize};

/// Text with its BCP-47 language tag, as returned for display names and summaries.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl LocalizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[serde(other)]
    BusinessStatusUnspecified,
}

impl BusinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "OPERATIONAL",
            Self::ClosedTemporarily => "CLOSED_TEMPORARILY",
            Self::ClosedPermanently => "CLOSED_PERMANENTLY",
            Self::BusinessStatusUnspecified => "BUSINESS_STATUS_UNSPECIFIED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceLevel {
    #[serde(rename = "PRICE_LEVEL_FREE")]
    Free,
    #[serde(rename = "PRICE_LEVEL_INEXPENSIVE")]
    Inexpensive,
    #[serde(rename = "PRICE_LEVEL_MODERATE")]
    Moderate,
    #[serde(rename = "PRICE_LEVEL_EXPENSIVE")]
    Expensive,
    #[serde(rename = "PRICE_LEVEL_VERY_EXPENSIVE")]
    VeryExpensive,
    #[serde(rename = "PRICE_LEVEL_UNSPECIFIED", other)]
    Unspecified,
}

impl PriceLevel {
    /// Ordinal tier 0-4. Unspecified counts as 0.
    pub fn tier(&self) -> usize {
        match self {
            Self::Free | Self::Unspecified => 0,
            Self::Inexpensive => 1,
            Self::Moderate => 2,
            Self::Expensive => 3,
            Self::VeryExpensive => 4,
        }
    }

    /// The tier rendered as a run of `$` symbols, empty for tier 0.
    pub fn symbols(&self) -> String {
        "$".repeat(self.tier())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    #[serde(default)]
    pub long_text: String,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

/// One end of an opening period. `day` is 0 for Sunday through 6 for Saturday.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    // Older payloads carry a preformatted "HHMM" string instead of hour/minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl PeriodPoint {
    /// Raw time of day as the source provided it, falling back to `HHMM`.
    pub fn time_of_day(&self) -> String {
        if let Some(time) = &self.time {
            return time.clone();
        }
        match self.hour {
            Some(hour) => format!("{:02}{:02}", hour, self.minute.unwrap_or(0)),
            None => String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OpeningPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<PeriodPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<PeriodPoint>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<OpeningPeriod>>,
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

/// Boolean service attributes. Absent means the provider did not report it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub takeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dine_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curbside_pickup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_breakfast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_lunch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_dinner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_beer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_wine: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_brunch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serves_vegetarian_food: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_seating: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_for_children: Option<bool>,
}

impl Amenities {
    fn or(self, fallback: Amenities) -> Amenities {
        Amenities {
            takeout: self.takeout.or(fallback.takeout),
            delivery: self.delivery.or(fallback.delivery),
            dine_in: self.dine_in.or(fallback.dine_in),
            curbside_pickup: self.curbside_pickup.or(fallback.curbside_pickup),
            reservable: self.reservable.or(fallback.reservable),
            serves_breakfast: self.serves_breakfast.or(fallback.serves_breakfast),
            serves_lunch: self.serves_lunch.or(fallback.serves_lunch),
            serves_dinner: self.serves_dinner.or(fallback.serves_dinner),
            serves_beer: self.serves_beer.or(fallback.serves_beer),
            serves_wine: self.serves_wine.or(fallback.serves_wine),
            serves_brunch: self.serves_brunch.or(fallback.serves_brunch),
            serves_vegetarian_food: self
                .serves_vegetarian_food
                .or(fallback.serves_vegetarian_food),
            outdoor_seating: self.outdoor_seating.or(fallback.outdoor_seating),
            menu_for_children: self.menu_for_children.or(fallback.menu_for_children),
        }
    }
}

/// A point of interest as returned by the Places API. Only `id` is guaranteed;
/// which other fields are present depends on the field mask of the request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLong>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_status: Option<BusinessStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<PriceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_type_display_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_components: Option<Vec<AddressComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial_summary: Option<LocalizedText>,
    #[serde(flatten)]
    pub amenities: Amenities,
}

impl Place {
    pub fn name(&self) -> &str {
        self.display_name
            .as_ref()
            .map(|n| n.text.as_str())
            .unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.primary_type_display_name
            .as_ref()
            .map(|c| c.text.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Overlays this (detail) record onto the partial search record it was
    /// fetched for. Fields the detail response left out keep their search value.
    pub fn merged_over(self, partial: Place) -> Place {
        Place {
            id: if self.id.is_empty() { partial.id } else { self.id },
            display_name: self.display_name.or(partial.display_name),
            location: self.location.or(partial.location),
            business_status: self.business_status.or(partial.business_status),
            rating: self.rating.or(partial.rating),
            user_rating_count: self.user_rating_count.or(partial.user_rating_count),
            price_level: self.price_level.or(partial.price_level),
            types: self.types.or(partial.types),
            primary_type_display_name: self
                .primary_type_display_name
                .or(partial.primary_type_display_name),
            formatted_address: self.formatted_address.or(partial.formatted_address),
            short_formatted_address: self
                .short_formatted_address
                .or(partial.short_formatted_address),
            address_components: self.address_components.or(partial.address_components),
            national_phone_number: self.national_phone_number.or(partial.national_phone_number),
            international_phone_number: self
                .international_phone_number
                .or(partial.international_phone_number),
            website_uri: self.website_uri.or(partial.website_uri),
            google_maps_uri: self.google_maps_uri.or(partial.google_maps_uri),
            regular_opening_hours: self.regular_opening_hours.or(partial.regular_opening_hours),
            current_opening_hours: self.current_opening_hours.or(partial.current_opening_hours),
            editorial_summary: self.editorial_summary.or(partial.editorial_summary),
            amenities: self.amenities.or(partial.amenities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_places_api_payload() {
        let payload = json!({
            "id": "ChIJ123",
            "displayName": { "text": "Contramar", "languageCode": "es" },
            "location": { "latitude": 19.4194, "longitude": -99.1676 },
            "businessStatus": "OPERATIONAL",
            "rating": 4.6,
            "userRatingCount": 12034,
            "priceLevel": "PRICE_LEVEL_EXPENSIVE",
            "types": ["seafood_restaurant", "restaurant"],
            "takeout": true,
            "dineIn": false,
            "regularOpeningHours": {
                "openNow": true,
                "periods": [{ "open": { "day": 1, "hour": 12, "minute": 30 } }]
            }
        });

        let place: Place = serde_json::from_value(payload).unwrap();

        assert_eq!(place.name(), "Contramar");
        assert_eq!(place.business_status, Some(BusinessStatus::Operational));
        assert_eq!(place.price_level.map(|p| p.tier()), Some(3));
        assert_eq!(place.amenities.takeout, Some(true));
        assert_eq!(place.amenities.dine_in, Some(false));
        assert_eq!(place.amenities.delivery, None);
        assert_eq!(place.user_rating_count, Some(12034));
    }

    #[test]
    fn unknown_enum_values_fall_back_to_unspecified() {
        let place: Place = serde_json::from_value(json!({
            "id": "x",
            "businessStatus": "SOMETHING_NEW",
            "priceLevel": "PRICE_LEVEL_LUXURIOUS"
        }))
        .unwrap();

        assert_eq!(
            place.business_status,
            Some(BusinessStatus::BusinessStatusUnspecified)
        );
        assert_eq!(place.price_level, Some(PriceLevel::Unspecified));
        assert_eq!(PriceLevel::Unspecified.symbols(), "");
    }

    #[test]
    fn period_point_prefers_raw_time() {
        let legacy = PeriodPoint {
            day: Some(2),
            time: Some("0930".to_string()),
            ..Default::default()
        };
        let structured = PeriodPoint {
            day: Some(2),
            hour: Some(9),
            minute: Some(5),
            ..Default::default()
        };

        assert_eq!(legacy.time_of_day(), "0930");
        assert_eq!(structured.time_of_day(), "0905");
        assert_eq!(PeriodPoint::default().time_of_day(), "");
    }

    #[test]
    fn detail_fields_win_and_search_fields_survive() {
        let partial = Place {
            id: "abc".to_string(),
            display_name: Some(LocalizedText::new("Old name")),
            primary_type_display_name: Some(LocalizedText::new("Restaurante")),
            rating: Some(4.1),
            ..Default::default()
        };
        let details = Place {
            display_name: Some(LocalizedText::new("New name")),
            website_uri: Some("https://example.mx".to_string()),
            amenities: Amenities {
                takeout: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = details.merged_over(partial);

        assert_eq!(merged.id, "abc");
        assert_eq!(merged.name(), "New name");
        assert_eq!(merged.category(), Some("Restaurante"));
        assert_eq!(merged.rating, Some(4.1));
        assert_eq!(merged.website_uri.as_deref(), Some("https://example.mx"));
        assert_eq!(merged.amenities.takeout, Some(true));
    }
}
