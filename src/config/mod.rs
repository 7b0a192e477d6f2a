use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 10;

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

// ─── GeminiConfig ─────────────────────────────────────────────────────────────

/// Gemini fallback categorizer configuration (`[gemini]` in config.toml).
///
/// The fallback itself is enabled solely by the presence of `GEMINI_API_KEY`;
/// these knobs only tune an enabled fallback.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model name appended to the endpoint path (default: "gemini-pro").
    pub model: String,
    /// Base URL of the generateContent API family.
    pub endpoint: String,
    /// Request timeout in seconds. A timed-out call counts as "no answer"
    /// and the task is categorized as Personal (default: 10).
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

// ─── TOML file schema ─────────────────────────────────────────────────────────

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 8000).
    port: Option<u16>,
    /// Log level filter string, e.g. "debug", "info,boardd=trace" (default: "info").
    log: Option<String>,
    /// Bind address for the HTTP server (default: "0.0.0.0"; use "127.0.0.1" for local only).
    bind_address: Option<String>,
    /// Directory holding the built frontend (index.html + assets/).
    static_dir: Option<PathBuf>,
    /// Log output format: "pretty" | "json".
    log_format: Option<String>,
    /// Gemini fallback settings (`[gemini]`).
    gemini: Option<GeminiConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── DaemonConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub log: String,
    /// Bind address for the HTTP server (BOARDD_BIND env var, default: "0.0.0.0").
    pub bind_address: String,
    /// Directory holding the built frontend. When index.html is missing the
    /// SPA routes answer with a "not built" placeholder instead.
    pub static_dir: PathBuf,
    /// Log output format: "pretty" (default) | "json" (structured for log aggregators).
    pub log_format: String,
    /// Gemini API key (GEMINI_API_KEY env var). None disables the AI fallback;
    /// keyword categorization keeps working.
    pub gemini_api_key: Option<String>,
    /// Gemini fallback tuning.
    pub gemini: GeminiConfig,
}

impl DaemonConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
        static_dir: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let static_dir = static_dir
            .or(toml.static_dir)
            .unwrap_or_else(|| PathBuf::from("frontend").join("dist"));

        let log_format = std::env::var("BOARDD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let gemini = toml.gemini.unwrap_or_default();

        Self {
            port,
            data_dir,
            log,
            bind_address,
            static_dir,
            log_format,
            gemini_api_key,
            gemini,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/boardd
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("boardd");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/boardd or ~/.local/share/boardd
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("boardd");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("boardd");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\boardd
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("boardd");
        }
    }
    PathBuf::from(".boardd")
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DaemonConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.bind_address, "0.0.0.0");
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.gemini.model, "gemini-pro");
        assert_eq!(cfg.gemini.timeout_secs, 10);
    }

    #[test]
    fn toml_overrides_defaults_but_not_cli() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r#"
port = 9001
log = "debug"

[gemini]
model = "gemini-1.5-flash"
timeout_secs = 3
"#,
        )
        .unwrap();

        let cfg = DaemonConfig::new(
            Some(9002),
            Some(dir.path().to_path_buf()),
            None,
            None,
            None,
        );
        // CLI wins over TOML
        assert_eq!(cfg.port, 9002);
        // TOML wins over defaults
        assert_eq!(cfg.log, "debug");
        assert_eq!(cfg.gemini.model, "gemini-1.5-flash");
        assert_eq!(cfg.gemini.timeout_secs, 3);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = \"not a number\"").unwrap();

        let cfg = DaemonConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 8000);
    }
}
