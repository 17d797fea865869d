use leptos::prelude::*;
use leptos_leaflet::{
    leaflet::{LatLng, LatLngBounds, Map},
    prelude::*,
};
use shared_types::search::{DEFAULT_ZOOM, MEXICO_CITY_CENTER};
use shared_types::{MapBounds, MapSession, MarkerPlacement, MarkerState};

use crate::views::map::map_marker::MapMarker;

#[component]
pub fn MapRenderer(session: RwSignal<MapSession>) -> impl IntoView {
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);
    let bounds: Memo<Option<MapBounds>> = Memo::new(move |_| session.with(|s| s.bounds().cloned()));
    // Hovering a row only flips a highlight flag, which leaves this list equal
    let placements: Memo<Vec<MarkerPlacement>> = Memo::new(move |_| {
        session.with(|s| s.markers().iter().map(MarkerState::placement).collect())
    });

    // Empty result sets leave the view where it is
    Effect::new(move |_| {
        let (Some(map), Some(bounds)) = (map.get(), bounds.get()) else {
            return;
        };
        let south_west = LatLng::new(bounds.south_west.latitude, bounds.south_west.longitude);
        let north_east = LatLng::new(bounds.north_east.latitude, bounds.north_east.longitude);
        map.fit_bounds(&LatLngBounds::new(&south_west, &north_east));
    });

    view! {
        <MapContainer
            style="height: 60vh; width: 100%"
            center=Position::new(MEXICO_CITY_CENTER.latitude, MEXICO_CITY_CENTER.longitude)
            zoom=DEFAULT_ZOOM
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            {move || {
                placements
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, placement)| {
                        let highlighted = Memo::new(move |_| session.with(|s| s.is_highlighted(index)));
                        view! { <MapMarker placement=placement highlighted=highlighted /> }
                    })
                    .collect_view()
            }}
        </MapContainer>
    }
}
