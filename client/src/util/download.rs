//! Browser file download via `Blob` + object URL + synthetic anchor click.
//!
//! TRADE-OFFS
//! ==========
//! Failures are swallowed: the save dialog is best-effort browser behavior
//! and the exporter contract reports nothing back. SSR paths no-op.

use crate::net::export::FileExport;

/// `FileExport` that saves through the browser's download flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDownload;

impl FileExport for BrowserDownload {
    fn download(&self, bytes: &[u8], mime_type: &str, filename: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Err(e) = save(bytes, mime_type, filename) {
                log::error!("download of {filename} failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bytes, mime_type, filename);
        }
    }
}

#[cfg(feature = "hydrate")]
fn save(bytes: &[u8], mime_type: &str, filename: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
