use serde::{Deserialize, Serialize};

use crate::place::AddressComponent;

pub const STATE: &str = "Mexico City";
pub const COUNTRY_CODE: &str = "MX";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressParts {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country_code: String,
}

/// Splits typed address components into the export address columns.
///
/// Each component fills at most one slot, checked in the order
/// route, sublocality, locality, postal_code. A place with no components at
/// all yields a fully empty result, state and country included.
pub fn decompose_address(components: Option<&[AddressComponent]>) -> AddressParts {
    let Some(components) = components else {
        return AddressParts::default();
    };

    let mut parts = AddressParts {
        state: STATE.to_string(),
        country_code: COUNTRY_CODE.to_string(),
        ..Default::default()
    };

    for component in components {
        let slot = if component.has_type("route") {
            &mut parts.street
        } else if component.has_type("sublocality") {
            &mut parts.neighborhood
        } else if component.has_type("locality") {
            &mut parts.city
        } else if component.has_type("postal_code") {
            &mut parts.postal_code
        } else {
            continue;
        };
        *slot = component.long_text.clone();
    }

    parts
}
