use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use server::errors::StartupError;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "filmes";

/// `.env`, then logging, then configuration. The only place any of the three
/// happens in the process.
fn bootstrap() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

fn install_panic_hook(service_id: Uuid) {
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

/// Run until the server stops on its own or Ctrl+C arrives.
async fn serve(cfg: AppConfig, service_id: Uuid) -> ExitCode {
    let pid = std::process::id();
    tokio::select! {
        res = server::run(cfg) => match res {
            Ok(()) => {
                info!(service = SERVICE, event = "stop", %service_id, pid, "server stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = SERVICE, event = "run_failed", error = %e, "server::run returned error");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!(service = SERVICE, event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
            ExitCode::SUCCESS
        }
    }
}

fn main() -> ExitCode {
    let cfg = match bootstrap() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "cannot start");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    install_panic_hook(service_id);

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %service_id,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "movie catalog service starting"
    );

    rt.block_on(serve(cfg, service_id))
}
