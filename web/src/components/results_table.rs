use leptos::prelude::*;
use shared_types::session::NO_RESULTS;
use shared_types::{MapSession, ResultRow};

#[component]
pub fn ResultsTable(session: RwSignal<MapSession>) -> impl IntoView {
    // Highlight toggles touch only markers, so hovering never rebuilds the rows
    let table = Memo::new(move |_| session.with(|s| (s.has_presented(), s.rows().to_vec())));

    view! {
        <table id="resultsTable" class="results-table">
            <tbody>
                {move || {
                    let (presented, rows) = table.get();
                    if rows.is_empty() {
                        // Nothing has been presented yet while the first search runs
                        if !presented {
                            return ().into_any();
                        }
                        return view! {
                            <tr><td>{NO_RESULTS}</td></tr>
                        }.into_any();
                    }

                    rows.into_iter()
                        .enumerate()
                        .map(|(index, row)| view! { <ResultRowView index=index row=row session=session /> })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
}

#[component]
fn ResultRowView(index: usize, row: ResultRow, session: RwSignal<MapSession>) -> impl IntoView {
    let ResultRow {
        title,
        status,
        category,
        rating,
        price,
        address,
        ..
    } = row;

    view! {
        <tr
            on:mouseenter=move |_| session.update(|s| s.set_highlight(index, true))
            on:mouseleave=move |_| session.update(|s| s.set_highlight(index, false))
        >
            <td>
                <strong>{title}</strong>
                <br/>
                {status.map(|badge| view! {
                    <span class=format!("status {}", badge.css_class)>{badge.label}</span>
                    <br/>
                })}
                {category.map(|category| view! { {category} <br/> })}
                {rating.map(|rating| view! { {rating} <br/> })}
                {price.map(|price| view! { {price} <br/> })}
                {address.map(|address| view! { {address} <br/> })}
            </td>
        </tr>
    }
}
