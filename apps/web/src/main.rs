mod dom;
mod fetch;

use std::rc::Rc;

use romi_dashboard_core::{ApiClient, Route, RouteError, ServerRoot};
use wasm_bindgen::JsValue;

use crate::dom::DomSurface;
use crate::fetch::FetchSource;

fn main() {
    if let Err(error) = start() {
        web_sys::console::error_1(&error);
    }
}

/// Server comes from `?server=...`, the first page from `#farms/...`
fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let location = window.location();

    let root = ServerRoot::from_query(&location.search()?)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    let route = route_from_hash(&location.hash()?).unwrap_or_else(|error| {
        web_sys::console::warn_1(&error.to_string().into());
        Route::Farms
    });

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let client = Rc::new(ApiClient::new(root, FetchSource));
    let surface = DomSurface::new(document, client)?;
    surface.show(route);

    Ok(())
}

fn route_from_hash(hash: &str) -> Result<Route, RouteError> {
    let path = hash.trim_start_matches('#');
    if path.is_empty() {
        Ok(Route::Farms)
    } else {
        Route::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_opens_farm_list() {
        assert_eq!(route_from_hash(""), Ok(Route::Farms));
        assert_eq!(route_from_hash("#"), Ok(Route::Farms));
    }

    #[test]
    fn hash_selects_start_route() {
        assert_eq!(
            route_from_hash("#farms/f1/zones/z1"),
            Ok(Route::Zone {
                farm: "f1".to_string(),
                zone: "z1".to_string()
            })
        );
        assert!(route_from_hash("#nowhere").is_err());
    }
}
