use clap::Parser;

use crate::config::{DEBUG_VAR, LOG_DIR_VAR, START_ROUTE_VAR};
use romi_dashboard_core::config::SERVER_URL_VAR;

#[derive(Debug, Parser)]
#[command(name = "romi_dashboard", version, about = "Farmer's Dashboard terminal browser")]
pub struct CliArgs {
    /// Root URL of the dashboard API
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Resource to open first, e.g. farms/f1/zones/z1
    #[arg(long, value_name = "PATH")]
    pub route: Option<String>,

    /// Print the rendered resource as HTML and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON instead of HTML
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the log directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(server) = &self.server {
            std::env::set_var(SERVER_URL_VAR, server);
        }
        if let Some(route) = &self.route {
            std::env::set_var(START_ROUTE_VAR, route);
        }
        if let Some(dir) = &self.log_dir {
            std::env::set_var(LOG_DIR_VAR, dir);
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_invocation() {
        let args = CliArgs::parse_from([
            "romi_dashboard",
            "--server",
            "http://localhost:5000",
            "--route",
            "farms/f1",
            "--headless",
            "--json",
        ]);

        assert_eq!(args.server.as_deref(), Some("http://localhost:5000"));
        assert_eq!(args.route.as_deref(), Some("farms/f1"));
        assert!(args.headless && args.json && !args.debug);
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
