use wasm_bindgen_futures::JsFuture;

/// Copy text to the clipboard, logging on failure.
pub fn copy_text(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::spawn_local(async move {
        if JsFuture::from(clipboard.write_text(&text)).await.is_err() {
            tracing::error!("Failed to copy to clipboard");
        }
    });
}
