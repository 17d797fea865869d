use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::{marker_color, MarkerPlacement};
use thaw::{Label, LabelSize};

/// Pin icon as an SVG data URL, filled with `color` (a `#rrggbb` string).
pub fn pin_icon(color: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cpath fill='{}' stroke='%23374151' stroke-width='1.5' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10zm0 13.5c-1.9 0-3.5-1.6-3.5-3.5s1.6-3.5 3.5-3.5 3.5 1.6 3.5 3.5-1.6 3.5-3.5 3.5z'/%3E%3C/svg%3E",
        color.replace('#', "%23")
    )
}

/// One placed pin. Only this pin is redrawn when its highlight flips.
#[component]
pub fn MapMarker(placement: MarkerPlacement, highlighted: Memo<bool>) -> impl IntoView {
    let MarkerPlacement { title, position, .. } = placement;

    move || {
        let title = title.clone();
        view! {
            <Marker
                position=Position::new(position.latitude, position.longitude)
                draggable=false
                icon_url=Some(pin_icon(marker_color(highlighted.get())))
                icon_size=Some((28.0, 42.0))
                icon_anchor=Some((14.0, 42.0))
            >
                <Popup>
                    <Label size=LabelSize::Large>{title.clone()}</Label>
                </Popup>
            </Marker>
        }
    }
}
