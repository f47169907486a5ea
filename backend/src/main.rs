//! Service entry-point: loads configuration, connects storage and serves the
//! REST API.

mod server;

use std::ffi::OsString;
use std::io;

use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use search_admin::config::AppSettings;

use server::{ServerConfig, build_http_state, connect_storage, create_server};

fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn startup_error(stage: &'static str, err: impl std::fmt::Display) -> io::Error {
    error!(stage, error = %err, "startup failed");
    io::Error::other(format!("{stage}: {err}"))
}

fn load_settings<I>(args: I) -> io::Result<AppSettings>
where
    I: IntoIterator<Item = OsString>,
{
    AppSettings::load_from_iter(args).map_err(|err| io::Error::other(err.to_string()))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = load_settings(std::env::args_os())?;
    init_tracing(settings.log_level());

    let backend = settings
        .backend()
        .map_err(|err| startup_error("configuration", err))?;
    let bind_addr = settings
        .listen_addr()
        .map_err(|err| startup_error("configuration", err))?;
    info!(storage = ?settings.storage_kind().ok(), %bind_addr, "starting search-admin");

    let ports = connect_storage(&backend)
        .await
        .map_err(|err| startup_error("storage", err))?;
    let server = create_server(ServerConfig::new(bind_addr, build_http_state(ports)))?;
    server.await
}
