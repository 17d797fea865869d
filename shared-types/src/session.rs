use serde::{Deserialize, Serialize};

use crate::place::{LatLong, Place};

pub const MARKER_COLOR: &str = "#ffffff";
pub const MARKER_HIGHLIGHT_COLOR: &str = "#ff0000";
pub const NO_RESULTS: &str = "No restaurants found";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapBounds {
    pub north_east: LatLong,
    pub south_west: LatLong,
}

impl MapBounds {
    /// Smallest box holding every position, or `None` for an empty set.
    pub fn enclosing(positions: impl IntoIterator<Item = LatLong>) -> Option<Self> {
        positions.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => MapBounds {
                    north_east: p,
                    south_west: p,
                },
                Some(MapBounds {
                    north_east,
                    south_west,
                }) => MapBounds {
                    north_east: LatLong::new(
                        north_east.latitude.max(p.latitude),
                        north_east.longitude.max(p.longitude),
                    ),
                    south_west: LatLong::new(
                        south_west.latitude.min(p.latitude),
                        south_west.longitude.min(p.longitude),
                    ),
                },
            })
        })
    }

    pub fn contains(&self, p: LatLong) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&p.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&p.longitude)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarkerState {
    pub place_id: String,
    pub title: String,
    pub position: LatLong,
    pub highlighted: bool,
}

/// The parts of a marker that only change with a new search.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub place_id: String,
    pub title: String,
    pub position: LatLong,
}

impl MarkerState {
    pub fn color(&self) -> &'static str {
        marker_color(self.highlighted)
    }

    pub fn placement(&self) -> MarkerPlacement {
        MarkerPlacement {
            place_id: self.place_id.clone(),
            title: self.title.clone(),
            position: self.position,
        }
    }
}

pub fn marker_color(highlighted: bool) -> &'static str {
    if highlighted {
        MARKER_HIGHLIGHT_COLOR
    } else {
        MARKER_COLOR
    }
}

/// One decimal place, exact ties rounded up (`4.25` is `4.3`).
fn one_decimal(value: f64) -> String {
    // Only multiples of 0.25 with an odd quarter count sit exactly on a tie
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).ceil() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub css_class: String,
}

/// Display fields of one results-table row. Absent data stays `None`
/// so the view renders nothing for it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResultRow {
    pub title: String,
    pub status: Option<StatusBadge>,
    pub category: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub address: Option<String>,
    /// Index into the session's markers, if the place has a location.
    pub marker: Option<usize>,
}

impl ResultRow {
    pub fn from_place(place: &Place) -> Self {
        ResultRow {
            title: place.name().to_string(),
            status: place.business_status.map(|s| StatusBadge {
                label: s.as_str().to_string(),
                css_class: s.as_str().to_lowercase(),
            }),
            category: place.category().map(str::to_string),
            rating: place.rating.filter(|r| *r != 0.0).map(|r| {
                format!(
                    "⭐ {} ({} reviews)",
                    one_decimal(r),
                    place.user_rating_count.unwrap_or(0)
                )
            }),
            price: place
                .price_level
                .map(|p| p.symbols())
                .filter(|s| !s.is_empty()),
            address: place.formatted_address.clone().filter(|a| !a.is_empty()),
            marker: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleSearch;

/// Everything currently shown for the last applied search: markers, table
/// rows, view bounds and the places behind them.
///
/// Searches are serialized by ticket: only the most recently issued ticket
/// may present, so an older search finishing late cannot clobber a newer one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSession {
    issued: u64,
    presented: Option<u64>,
    places: Vec<Place>,
    markers: Vec<MarkerState>,
    rows: Vec<ResultRow>,
    bounds: Option<MapBounds>,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_search(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Replaces all visual state with `places`. Previous markers are dropped
    /// before any new one is placed.
    pub fn present(&mut self, ticket: SearchTicket, places: Vec<Place>) -> Result<(), StaleSearch> {
        if !self.is_current(ticket) {
            return Err(StaleSearch);
        }

        self.markers.clear();
        self.rows.clear();

        for place in &places {
            let mut row = ResultRow::from_place(place);
            if let Some(position) = place.location {
                row.marker = Some(self.markers.len());
                self.markers.push(MarkerState {
                    place_id: place.id.clone(),
                    title: place.name().to_string(),
                    position,
                    highlighted: false,
                });
            }
            self.rows.push(row);
        }

        self.bounds = MapBounds::enclosing(self.markers.iter().map(|m| m.position));
        self.places = places;
        self.presented = Some(ticket.0);
        Ok(())
    }

    /// Highlight toggle for hovering over a table row.
    pub fn set_highlight(&mut self, row: usize, highlighted: bool) {
        let marker = self.rows.get(row).and_then(|r| r.marker);
        if let Some(marker) = marker.and_then(|m| self.markers.get_mut(m)) {
            marker.highlighted = highlighted;
        }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn markers(&self) -> &[MarkerState] {
        &self.markers
    }

    pub fn is_highlighted(&self, marker: usize) -> bool {
        self.markers.get(marker).is_some_and(|m| m.highlighted)
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn bounds(&self) -> Option<&MapBounds> {
        self.bounds.as_ref()
    }

    pub fn has_presented(&self) -> bool {
        self.presented.is_some()
    }

    pub fn can_export(&self) -> bool {
        !self.places.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::{BusinessStatus, LocalizedText, PriceLevel};

    fn place(id: &str, lat: f64, lng: f64) -> Place {
        Place {
            id: id.to_string(),
            display_name: Some(LocalizedText::new(id)),
            location: Some(LatLong::new(lat, lng)),
            ..Default::default()
        }
    }

    #[test]
    fn second_search_replaces_markers() {
        let mut session = MapSession::new();

        let first = session.begin_search();
        session
            .present(
                first,
                vec![
                    place("a", 19.40, -99.10),
                    place("b", 19.41, -99.11),
                    place("c", 19.42, -99.12),
                ],
            )
            .unwrap();
        assert_eq!(session.markers().len(), 3);

        let second = session.begin_search();
        session
            .present(second, vec![place("d", 19.43, -99.13), place("e", 19.44, -99.14)])
            .unwrap();

        assert_eq!(session.markers().len(), 2);
        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.markers()[0].place_id, "d");
    }

    #[test]
    fn stale_ticket_cannot_present() {
        let mut session = MapSession::new();
        let slow = session.begin_search();
        let fast = session.begin_search();

        session.present(fast, vec![place("fresh", 19.4, -99.1)]).unwrap();

        assert_eq!(
            session.present(slow, vec![place("old", 1.0, 1.0), place("older", 2.0, 2.0)]),
            Err(StaleSearch)
        );
        assert_eq!(session.markers().len(), 1);
        assert_eq!(session.places()[0].id, "fresh");
    }

    #[test]
    fn bounds_hug_every_marker() {
        let mut session = MapSession::new();
        let ticket = session.begin_search();
        let places = vec![
            place("a", 19.40, -99.20),
            place("b", 19.45, -99.10),
            place("c", 19.42, -99.15),
        ];

        session.present(ticket, places.clone()).unwrap();

        let bounds = session.bounds().unwrap();
        assert_eq!(bounds.north_east, LatLong::new(19.45, -99.10));
        assert_eq!(bounds.south_west, LatLong::new(19.40, -99.20));
        assert!(places
            .iter()
            .all(|p| bounds.contains(p.location.unwrap())));
    }

    #[test]
    fn empty_results_have_no_bounds_and_no_export() {
        let mut session = MapSession::new();
        let ticket = session.begin_search();

        session.present(ticket, Vec::new()).unwrap();

        assert!(session.has_presented());
        assert!(session.bounds().is_none());
        assert!(session.rows().is_empty());
        assert!(!session.can_export());
    }

    #[test]
    fn highlight_follows_the_hovered_row() {
        let mut session = MapSession::new();
        let ticket = session.begin_search();
        let mut no_location = place("nowhere", 0.0, 0.0);
        no_location.location = None;
        session
            .present(ticket, vec![no_location, place("here", 19.4, -99.1)])
            .unwrap();

        assert_eq!(session.rows()[0].marker, None);
        assert_eq!(session.rows()[1].marker, Some(0));

        session.set_highlight(1, true);
        assert_eq!(session.markers()[0].color(), MARKER_HIGHLIGHT_COLOR);
        session.set_highlight(0, true);
        session.set_highlight(1, false);
        assert_eq!(session.markers()[0].color(), MARKER_COLOR);
    }

    #[test]
    fn highlight_leaves_marker_placement_alone() {
        let mut session = MapSession::new();
        let ticket = session.begin_search();
        session
            .present(ticket, vec![place("a", 19.40, -99.10), place("b", 19.41, -99.11)])
            .unwrap();
        let before: Vec<MarkerPlacement> = session.markers().iter().map(MarkerState::placement).collect();

        session.set_highlight(1, true);

        let after: Vec<MarkerPlacement> = session.markers().iter().map(MarkerState::placement).collect();
        assert_eq!(before, after);
        assert!(!session.is_highlighted(0));
        assert!(session.is_highlighted(1));
        assert!(!session.is_highlighted(7));
    }

    #[test]
    fn rating_ties_round_up() {
        let rated = |rating: f64| {
            let mut p = place("Contramar", 19.4, -99.1);
            p.rating = Some(rating);
            ResultRow::from_place(&p).rating
        };

        assert_eq!(rated(4.25).as_deref(), Some("⭐ 4.3 (0 reviews)"));
        assert_eq!(rated(4.75).as_deref(), Some("⭐ 4.8 (0 reviews)"));
        assert_eq!(rated(4.0).as_deref(), Some("⭐ 4.0 (0 reviews)"));
        assert_eq!(rated(4.66).as_deref(), Some("⭐ 4.7 (0 reviews)"));
        assert_eq!(rated(4.64).as_deref(), Some("⭐ 4.6 (0 reviews)"));
    }

    #[test]
    fn row_renders_only_present_fields() {
        let bare = ResultRow::from_place(&place("Fonda", 19.4, -99.1));
        assert_eq!(bare.title, "Fonda");
        assert!(bare.status.is_none());
        assert!(bare.category.is_none());
        assert!(bare.rating.is_none());
        assert!(bare.price.is_none());
        assert!(bare.address.is_none());

        let mut rich = place("Rosetta", 19.4, -99.1);
        rich.business_status = Some(BusinessStatus::ClosedTemporarily);
        rich.rating = Some(4.66);
        rich.user_rating_count = Some(2301);
        rich.price_level = Some(PriceLevel::Moderate);
        let row = ResultRow::from_place(&rich);

        assert_eq!(
            row.status,
            Some(StatusBadge {
                label: "CLOSED_TEMPORARILY".to_string(),
                css_class: "closed_temporarily".to_string(),
            })
        );
        assert_eq!(row.rating.as_deref(), Some("⭐ 4.7 (2301 reviews)"));
        assert_eq!(row.price.as_deref(), Some("$$"));
    }

    #[test]
    fn five_ranked_places_keep_their_order() {
        let mut session = MapSession::new();
        let ticket = session.begin_search();
        let places: Vec<Place> = [4.9, 4.8, 4.7, 4.5, 4.2]
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                let mut p = place(&format!("r{i}"), 19.4 + i as f64 / 100.0, -99.1);
                p.rating = Some(*rating);
                p
            })
            .collect();

        session.present(ticket, places).unwrap();

        let titles: Vec<&str> = session.rows().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["r0", "r1", "r2", "r3", "r4"]);
        assert!(session.can_export());
    }
}
