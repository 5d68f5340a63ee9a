use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use romi_dashboard_core::{
    navigate, ApiClient, FetchError, Fragment, LocalDataSource, Route, Surface,
};
use std::io::{self, Stdout, Write};
use std::process::ExitCode;

use crate::app::{handle_input, App};
use crate::ui;

/// Collects the outcome of a single headless navigation. Alerts go to
/// `errors`, which is stderr outside of tests.
#[derive(Debug)]
struct HeadlessSurface<W> {
    fragment: Fragment,
    errors: W,
}

impl<W: Write> Surface for HeadlessSurface<W> {
    fn replace(&mut self, fragment: Fragment) {
        self.fragment = fragment;
    }

    fn alert(&mut self, message: &str) {
        tracing::error!("{message}");
        if let Err(error) = writeln!(self.errors, "{message}") {
            tracing::warn!("Could not report alert: {error}");
        }
    }
}

/// Run the application in headless mode (no UI). A failed request has
/// already been reported on stderr and only sets the exit code.
pub async fn run_headless<S: LocalDataSource>(
    client: &ApiClient<S>,
    route: &Route,
    json: bool,
) -> Result<ExitCode> {
    match render_headless(client, route, json, io::stderr()).await {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if error.downcast_ref::<FetchError>().is_some() => Ok(ExitCode::FAILURE),
        Err(error) => Err(error),
    }
}

async fn render_headless<S: LocalDataSource, W: Write>(
    client: &ApiClient<S>,
    route: &Route,
    json: bool,
    errors: W,
) -> Result<String> {
    let mut surface = HeadlessSurface {
        fragment: Fragment::new(),
        errors,
    };
    navigate(client, route, &mut surface).await?;

    if json {
        let mut json = serde_json::to_string_pretty(&surface.fragment)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(surface.fragment.to_html())
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    terminal
        .draw(|f| ui::ui(app, f))
        .map(|_| ())
        .map_err(|e| eyre!("Terminal draw error: {e}"))
}

/// Run the main application event loop
pub async fn run<S: LocalDataSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &ApiClient<S>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Navigations are awaited one at a time; input waits until the page is in
        if let Some(navigation) = app.pending.take() {
            app.status_message = format!("Loading {}...", navigation.route);
            draw(terminal, app)?;

            match navigate(client, &navigation.route, app).await {
                Ok(()) => app.arrive(navigation),
                Err(error) => app.navigation_failed(navigation, &error),
            }
        }

        draw(terminal, app)?;

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Redrawn at the top of the next iteration
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use romi_dashboard_core::{ServerRoot, StaticSource};
    use serde_json::json;

    fn client() -> ApiClient<StaticSource> {
        let source = StaticSource::new()
            .with_json(
                "http://0.0.0.0:5000/farms",
                json!([{ "id": "f1", "short_name": "chatelain", "name": "Chatelain" }]),
            )
            .with_status("http://0.0.0.0:5000/farms/f1", 502);
        ApiClient::new(ServerRoot::default(), source)
    }

    #[tokio::test]
    async fn headless_html_output() -> Result<()> {
        let html = render_headless(&client(), &Route::Farms, false, io::sink()).await?;
        assert_eq!(
            html,
            "<a class=\"farm-name\" href=\"#farms/f1\" data-route=\"farms/f1\">Chatelain</a><br>\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn headless_json_output() -> Result<()> {
        let output = render_headless(&client(), &Route::Farms, true, io::sink()).await?;
        let value: serde_json::Value = serde_json::from_str(&output)?;

        assert_eq!(value["nodes"][0]["node"], "link");
        assert_eq!(value["nodes"][0]["target"]["kind"], "farm");
        assert_eq!(value["nodes"][0]["target"]["farm"], "f1");
        Ok(())
    }

    #[tokio::test]
    async fn headless_failure_writes_one_alert() {
        let route = Route::Farm {
            farm: "f1".to_string(),
        };
        let mut errors = Vec::new();

        let result = render_headless(&client(), &route, false, &mut errors).await;

        let message = result.err().map(|e| e.to_string());
        assert_eq!(
            message.as_deref(),
            Some("Request for http://0.0.0.0:5000/farms/f1 failed: Status 502")
        );
        assert_eq!(
            String::from_utf8_lossy(&errors),
            "Request for http://0.0.0.0:5000/farms/f1 failed: Status 502\n"
        );
    }
}
