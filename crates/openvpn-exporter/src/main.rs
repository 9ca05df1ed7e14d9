//! openvpn-exporter - Prometheus exporter for OpenVPN status files.
//!
//! Serves the metrics of one or more OpenVPN status files over HTTP. Every
//! scrape re-reads all configured files.

mod handlers;
mod state;

use std::net::SocketAddr;
use std::process;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use openvpn_exporter_core::collector::{FileSystem, RealFs, StatusCollector};
use openvpn_exporter_core::schema::{LabelDetail, StatusSchema};

use state::AppState;

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(
    name = "openvpn-exporter",
    about = "Prometheus exporter for OpenVPN status files",
    version = openvpn_exporter_core::VERSION
)]
struct Args {
    /// Address to listen on for web interface and telemetry.
    #[arg(long, default_value = "0.0.0.0:9176", env = "OPENVPN_EXPORTER_LISTEN")]
    listen: String,

    /// Path under which to expose metrics.
    #[arg(
        long,
        default_value = "/metrics",
        env = "OPENVPN_EXPORTER_TELEMETRY_PATH"
    )]
    telemetry_path: String,

    /// Comma-separated list of paths to OpenVPN status files.
    #[arg(
        long,
        default_value = "/etc/openvpn/openvpn-status.log",
        env = "OPENVPN_EXPORTER_STATUS_PATHS",
        value_delimiter = ','
    )]
    status_paths: Vec<String>,

    /// Label server metrics by common name only, dropping per-connection details.
    #[arg(long, env = "OPENVPN_EXPORTER_IGNORE_INDIVIDUALS")]
    ignore_individuals: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["openvpn_exporter", "openvpn_exporter_core"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn router(state: AppState) -> Router {
    let telemetry_path = state.telemetry_path.to_string();
    let mut app = Router::new().route(&telemetry_path, get(handlers::handle_metrics));
    if telemetry_path != "/" {
        app = app.route("/", get(handlers::handle_index));
    }

    app.with_state(state).layer(CompressionLayer::new())
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    if !args.telemetry_path.starts_with('/') {
        error!(
            telemetry_path = %args.telemetry_path,
            "telemetry path must start with '/'"
        );
        process::exit(1);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            process::exit(1);
        }
    };

    runtime.block_on(async_main(args));
}

async fn async_main(args: Args) {
    let detail = if args.ignore_individuals {
        LabelDetail::CommonNameOnly
    } else {
        LabelDetail::Individual
    };
    let fs: Box<dyn FileSystem> = Box::new(RealFs::new());
    let collector = StatusCollector::new(fs, args.status_paths, StatusSchema::new(detail));

    info!(
        version = openvpn_exporter_core::VERSION,
        status_paths = ?collector.status_paths(),
        ignore_individuals = args.ignore_individuals,
        "starting"
    );
    for status_path in collector.missing_sources() {
        warn!(status_path, "status file does not exist yet");
    }

    let app = router(AppState::new(collector, &args.telemetry_path));

    let addr: SocketAddr = match args.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(listen = %args.listen, error = %e, "invalid listen address");
            process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            process::exit(1);
        }
    };
    info!(%addr, telemetry_path = %args.telemetry_path, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        process::exit(1);
    }
}
