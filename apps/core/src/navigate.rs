use crate::api::{ApiClient, Route};
use crate::error::FetchError;
use crate::fragment::Fragment;
use crate::source::LocalDataSource;
use crate::view;

/// Where fragments end up: the browser DOM, a terminal, a test recorder
pub trait Surface {
    /// Drops whatever is shown and displays `fragment` instead
    fn replace(&mut self, fragment: Fragment);

    /// Blocking, user-visible failure notice
    fn alert(&mut self, message: &str);
}

/// Fetches `route`, renders it and swaps it into `surface`.
///
/// Failures raise exactly one alert and are also returned so callers can
/// keep their own bookkeeping (history, exit codes) straight. Overlapping
/// calls are not sequenced: whichever response lands last is displayed.
pub async fn navigate<S, V>(
    client: &ApiClient<S>,
    route: &Route,
    surface: &mut V,
) -> Result<(), FetchError>
where
    S: LocalDataSource,
    V: Surface + ?Sized,
{
    match client.fetch(route).await {
        Ok(resource) => {
            tracing::debug!(route = %route, kind = resource.kind(), "rendering resource");
            surface.replace(view::render(&resource, client.root()));
            Ok(())
        }
        Err(error) => {
            surface.alert(&error.to_string());
            Err(error)
        }
    }
}
