//! Save generated text (receipts, CSV exports) as a browser download.

/// Trigger a download of `contents` as `file_name`.
///
/// # Errors
///
/// Returns an error string when the browser refuses to build the blob or
/// the temporary link; native builds always fail.
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::{JsCast, JsValue};

        let js_err = |e: JsValue| format!("{e:?}");
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;

        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "anchor element expected".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        let body = document.body().ok_or_else(|| "no body".to_owned())?;
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        let _ = body.remove_child(&anchor);
        let _ = web_sys::Url::revoke_object_url(&url);
        log::debug!("downloaded {file_name}");
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (file_name, mime, contents);
        Err("downloads require a browser".to_owned())
    }
}
