use romi_dashboard_core::{FetchError, LocalDataSource};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// `window.fetch` source. Futures hold JS handles, so this is the local
/// (non-`Send`) flavour of the source trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSource;

impl LocalDataSource for FetchSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let transport = |error: &JsValue| FetchError::Transport {
            url: url.to_string(),
            message: js_message(error),
        };
        let decode = |message: String| FetchError::Decode {
            url: url.to_string(),
            message,
        };

        let window = web_sys::window().ok_or_else(|| transport(&JsValue::from_str("no window")))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(|e| transport(&e))?;

        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| transport(&e))?;

        let response: Response = response_value.dyn_into().map_err(|e| transport(&e))?;

        if response.status() != 200 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        // Parsed on the Rust side so key order and integers survive untouched
        let text_promise = response.text().map_err(|e| decode(js_message(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| decode(js_message(&e)))?
            .as_string()
            .unwrap_or_default();

        let body: Value = serde_json::from_str(&text).map_err(|e| decode(e.to_string()))?;
        web_sys::console::log_1(&format!("{url}: {body}").into());
        Ok(body)
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
