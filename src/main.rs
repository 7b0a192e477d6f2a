use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use boardd::{
    config::DaemonConfig,
    intelligence::{gemini::GeminiCategorizer, Categorizer, FallbackCategorizer},
    rest,
    tasks::TaskStore,
    AppContext,
};

#[derive(Parser)]
#[command(
    name = "boardd",
    about = "Task Board Host — always-on task board backend daemon",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "BOARDD_PORT")]
    port: Option<u16>,

    /// Data directory for config.toml and log files
    #[arg(long, env = "BOARDD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BOARDD_LOG")]
    log: Option<String>,

    /// Bind address for the HTTP server (default: 0.0.0.0; use 127.0.0.1 for local only)
    #[arg(long, env = "BOARDD_BIND")]
    bind_address: Option<String>,

    /// Directory holding the built frontend (index.html + assets/)
    #[arg(long, env = "BOARDD_STATIC_DIR")]
    static_dir: Option<std::path::PathBuf>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "BOARDD_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Arc::new(DaemonConfig::new(
        args.port,
        args.data_dir,
        args.log,
        args.bind_address,
        args.static_dir,
    ));

    let _log_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "boardd starting");
    info!(
        port = config.port,
        bind = %config.bind_address,
        static_dir = %config.static_dir.display(),
        "config loaded"
    );

    // ── Gemini fallback availability ─────────────────────────────────────────
    // A missing key is normal operation; keyword categorization carries on.
    let fallback: Option<Arc<dyn FallbackCategorizer>> = match config.gemini_api_key.as_deref() {
        Some(key) => match GeminiCategorizer::new(key, &config.gemini) {
            Ok(gemini) => {
                info!(model = %config.gemini.model, "gemini categorization fallback enabled");
                Some(Arc::new(gemini))
            }
            Err(e) => {
                warn!(err = %e, "could not initialize gemini fallback — keyword categorization only");
                None
            }
        },
        None => {
            info!("GEMINI_API_KEY not set — keyword categorization only");
            None
        }
    };

    let store = Arc::new(TaskStore::new(Categorizer::new(fallback)));

    let ctx = Arc::new(AppContext {
        config,
        store,
        started_at: std::time::Instant::now(),
    });

    rest::start_rest_server(ctx).await
}

// ── Logging setup ─────────────────────────────────────────────────────────────

/// Initialize tracing with the given env-filter level.
///
/// Without a log file: stdout only. With one: stdout + daily-rotated file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("boardd.log"));

        // tracing-appender needs the directory to exist before it opens the file.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
