use leptos::prelude::*;
use shared_types::export::EXPORT_MIME_TYPE;
use shared_types::{places_to_csv, MapSession, EXPORT_FILENAME};
use thaw::{Button, ButtonAppearance};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers the current results as a CSV download. Only rendered while the
/// session holds a non-empty result set.
#[component]
pub fn ExportButton(session: RwSignal<MapSession>) -> impl IntoView {
    let on_click = move |_| {
        let document = session.with_untracked(|s| places_to_csv(s.places()));
        match document {
            Ok(document) => {
                if let Err(e) = download_csv(&document) {
                    leptos::logging::error!("Failed to download CSV: {:?}", e);
                }
            }
            Err(e) => leptos::logging::error!("Failed to build CSV: {}", e),
        }
    };

    view! {
        <Show when=move || session.with(|s| s.can_export())>
            <Button appearance=ButtonAppearance::Primary on_click=on_click>
                "Export to CSV"
            </Button>
        </Show>
    }
}

/// Hands `document` to the browser as a file download via a hidden link.
fn download_csv(document: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dom = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = dom.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(document));
    let options = BlobPropertyBag::new();
    options.set_type(EXPORT_MIME_TYPE);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = dom.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    link.set_href(&url);
    link.set_download(EXPORT_FILENAME);
    web_sys::HtmlElement::style(&link).set_property("visibility", "hidden")?;

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Url::revoke_object_url(&url)
}
