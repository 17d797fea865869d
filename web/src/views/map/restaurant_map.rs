use leptos::{prelude::*, task::spawn_local};
use shared_types::MapSession;

use crate::{
    components::{ErrorView, ExportButton, LoadingView, ResultsTable},
    server::search_restaurants,
    views::map::map_renderer::MapRenderer,
};

/// Map, results table and export control for one [`MapSession`].
///
/// The first search fires once the page has hydrated. Every search takes a
/// ticket from the session; results arriving for an outdated ticket are
/// dropped so two overlapping searches can never interleave their markers.
#[component]
pub fn RestaurantMap() -> impl IntoView {
    let session = RwSignal::new(MapSession::new());
    let searching = RwSignal::new(false);
    let search_error = RwSignal::new(None::<String>);

    let perform_search = move || {
        let Some(ticket) = session.try_update(|s| s.begin_search()) else {
            return;
        };
        searching.set(true);

        spawn_local(async move {
            let result = search_restaurants().await;
            if !session.with_untracked(|s| s.is_current(ticket)) {
                leptos::logging::log!("Dropping results of a superseded search");
                return;
            }

            match result {
                Ok(places) => {
                    leptos::logging::log!("Presenting {} restaurants", places.len());
                    search_error.set(None);
                    session.update(|s| {
                        if s.present(ticket, places).is_err() {
                            leptos::logging::log!("Discarding results of a superseded search");
                        }
                    });
                }
                Err(e) => {
                    leptos::logging::error!("Error searching places: {}", e);
                    search_error.set(Some(e.to_string()));
                }
            }
            searching.set(false);
        });
    };

    Effect::new(move |_| perform_search());

    view! {
        <div class="restaurant-map">
            <div class="search-controls">
                <button
                    class="search-button"
                    disabled=move || searching.get()
                    on:click=move |_| perform_search()
                >
                    "Search again"
                </button>
                <ExportButton session=session />
            </div>

            <MapRenderer session=session />

            <Show when=move || searching.get()>
                <LoadingView message=None />
            </Show>
            {move || search_error.get().map(|message| view! {
                <ErrorView title="Search failed" message=Some(message) />
            })}

            <ResultsTable session=session />
        </div>
    }
}
