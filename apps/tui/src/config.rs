use color_eyre::eyre::eyre;
use dotenv::dotenv;
use romi_dashboard_core::config::SERVER_URL_VAR;
use romi_dashboard_core::{Route, ServerRoot};
use std::env;
use std::path::PathBuf;

pub const START_ROUTE_VAR: &str = "ROMI_START_ROUTE";
pub const LOG_FILTER_VAR: &str = "ROMI_LOG";
pub const LOG_DIR_VAR: &str = "ROMI_LOG_DIR";
pub const DEBUG_VAR: &str = "DEBUG";

const DEFAULT_LOG_FILTER: &str = "romi_dashboard=info,romi_dashboard_core=info,warn";
const DEBUG_LOG_FILTER: &str = "romi_dashboard=debug,romi_dashboard_core=debug,info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerRoot,
    pub start_route: Route,
    pub log_filter: String,
    pub log_dir: PathBuf,
}

/// Initializes the application configuration from `.env` and the environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let server = match env::var(SERVER_URL_VAR) {
        Ok(value) => ServerRoot::parse(&value)?,
        Err(_) => ServerRoot::default(),
    };

    let start_route = env::var(START_ROUTE_VAR).map_or(Ok(Route::Farms), |path| {
        Route::parse(&path).map_err(|e| eyre!("{START_ROUTE_VAR}: {e}"))
    })?;

    let debug = env::var(DEBUG_VAR).is_ok_and(|value| !value.is_empty() && value != "0");
    let log_filter = if debug {
        DEBUG_LOG_FILTER.to_string()
    } else {
        env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    };

    Ok(AppConfig {
        server,
        start_route,
        log_filter,
        log_dir: get_log_dir(),
    })
}

/// Gets the directory the log file is written to
pub fn get_log_dir() -> PathBuf {
    env::var(LOG_DIR_VAR).map_or_else(|_| PathBuf::from("./logs"), PathBuf::from)
}
