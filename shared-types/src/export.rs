use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::address::decompose_address;
use crate::hours::{format_opening_hours, DayHours};
use crate::place::{Amenities, BusinessStatus, Place};

pub const EXPORT_FILENAME: &str = "mexico_city_restaurants.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8";

pub const EXPORT_COLUMNS: [&str; 25] = [
    "isAdvertisement",
    "title",
    "description",
    "price",
    "categoryName",
    "address",
    "neighborhood",
    "street",
    "city",
    "postalCode",
    "state",
    "countryCode",
    "website",
    "phone",
    "phoneUnformatted",
    "claimThisBusiness",
    "location",
    "totalScore",
    "permanentlyClosed",
    "temporarilyClosed",
    "placeId",
    "categories",
    "reviewsCount",
    "features",
    "openingHours",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("there are no places to export")]
    NoPlaces,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize cell: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output was not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ExportLocation {
    #[serde(serialize_with = "whole_as_integer")]
    pub lat: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub lng: f64,
}

/// Whole coordinates print without a trailing `.0`, matching the `Display`
/// form used for the other numeric cells.
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub takeout: bool,
    pub delivery: bool,
    pub dine_in: bool,
    pub curbside_pickup: bool,
    pub reservable: bool,
    pub serves_breakfast: bool,
    pub serves_lunch: bool,
    pub serves_dinner: bool,
    pub serves_beer: bool,
    pub serves_wine: bool,
    pub serves_brunch: bool,
    pub serves_vegetarian_food: bool,
    pub outdoor_seating: bool,
    pub menu_for_children: bool,
}

impl From<&Amenities> for Features {
    fn from(a: &Amenities) -> Self {
        Features {
            takeout: a.takeout.unwrap_or(false),
            delivery: a.delivery.unwrap_or(false),
            dine_in: a.dine_in.unwrap_or(false),
            curbside_pickup: a.curbside_pickup.unwrap_or(false),
            reservable: a.reservable.unwrap_or(false),
            serves_breakfast: a.serves_breakfast.unwrap_or(false),
            serves_lunch: a.serves_lunch.unwrap_or(false),
            serves_dinner: a.serves_dinner.unwrap_or(false),
            serves_beer: a.serves_beer.unwrap_or(false),
            serves_wine: a.serves_wine.unwrap_or(false),
            serves_brunch: a.serves_brunch.unwrap_or(false),
            serves_vegetarian_food: a.serves_vegetarian_food.unwrap_or(false),
            outdoor_seating: a.outdoor_seating.unwrap_or(false),
            menu_for_children: a.menu_for_children.unwrap_or(false),
        }
    }
}

/// A place flattened into the spreadsheet layout of [`EXPORT_COLUMNS`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub is_advertisement: bool,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category_name: String,
    pub address: Option<String>,
    pub neighborhood: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country_code: String,
    pub website: String,
    pub phone: String,
    pub phone_unformatted: String,
    pub claim_this_business: bool,
    pub location: Option<ExportLocation>,
    pub total_score: Option<f64>,
    pub permanently_closed: bool,
    pub temporarily_closed: bool,
    pub place_id: String,
    pub categories: Vec<String>,
    pub reviews_count: Option<u32>,
    pub features: Features,
    pub opening_hours: Vec<DayHours>,
}

impl ExportRow {
    pub fn from_place(place: &Place) -> Self {
        let address = decompose_address(place.address_components.as_deref());
        let category = place.category().unwrap_or_default().to_string();
        let phone = place.national_phone_number.clone().unwrap_or_default();

        let description = place
            .editorial_summary
            .as_ref()
            .map(|s| s.text.clone())
            .filter(|s| !s.is_empty())
            .or_else(|| place.types.as_ref().map(|t| t.join(", ")))
            .unwrap_or_default();

        ExportRow {
            is_advertisement: false,
            title: place.name().to_string(),
            description,
            price: place.price_level.map(|p| p.symbols()).unwrap_or_default(),
            category_name: category.clone(),
            address: place.formatted_address.clone(),
            neighborhood: address.neighborhood,
            street: address.street,
            city: address.city,
            postal_code: address.postal_code,
            state: address.state,
            country_code: address.country_code,
            website: place.website_uri.clone().unwrap_or_default(),
            phone_unformatted: phone.chars().filter(char::is_ascii_digit).collect(),
            phone,
            claim_this_business: false,
            location: place.location.map(|l| ExportLocation {
                lat: l.latitude,
                lng: l.longitude,
            }),
            total_score: place.rating,
            permanently_closed: place.business_status == Some(BusinessStatus::ClosedPermanently),
            temporarily_closed: place.business_status == Some(BusinessStatus::ClosedTemporarily),
            place_id: place.id.clone(),
            categories: vec![category],
            reviews_count: place.user_rating_count,
            features: Features::from(&place.amenities),
            opening_hours: format_opening_hours(place.regular_opening_hours.as_ref()),
        }
    }

    /// Cell text for every column, in [`EXPORT_COLUMNS`] order.
    pub fn cells(&self) -> Result<Vec<String>, serde_json::Error> {
        Ok(vec![
            self.is_advertisement.to_string(),
            self.title.clone(),
            self.description.clone(),
            self.price.clone(),
            self.category_name.clone(),
            self.address.clone().unwrap_or_default(),
            self.neighborhood.clone(),
            self.street.clone(),
            self.city.clone(),
            self.postal_code.clone(),
            self.state.clone(),
            self.country_code.clone(),
            self.website.clone(),
            self.phone.clone(),
            self.phone_unformatted.clone(),
            self.claim_this_business.to_string(),
            match &self.location {
                Some(location) => serde_json::to_string(location)?,
                None => String::new(),
            },
            self.total_score.map(|s| s.to_string()).unwrap_or_default(),
            self.permanently_closed.to_string(),
            self.temporarily_closed.to_string(),
            self.place_id.clone(),
            serde_json::to_string(&self.categories)?,
            self.reviews_count.map(|c| c.to_string()).unwrap_or_default(),
            serde_json::to_string(&self.features)?,
            serde_json::to_string(&self.opening_hours)?,
        ])
    }
}

/// Renders places as the export CSV document.
///
/// The header is written bare; every data cell is quoted with embedded quotes
/// doubled. Records are separated by `\n` with no trailing newline.
pub fn places_to_csv(places: &[Place]) -> Result<String, ExportError> {
    if places.is_empty() {
        return Err(ExportError::NoPlaces);
    }

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(EXPORT_COLUMNS)?;
    let buffer = header.into_inner().map_err(|e| e.into_error())?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for place in places {
        writer.write_record(ExportRow::from_place(place).cells()?)?;
    }

    let mut bytes = writer.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(String::from_utf8(bytes)?)
}
