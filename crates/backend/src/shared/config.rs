use contracts::shared::metrics::NumberLocale;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub formatting: FormattingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "target/db/metas.db".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub file: String,
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "target/logs".into(),
            file: "backend.log".into(),
            filter: "info,sqlx=warn,sea_orm=warn".into(),
        }
    }
}

/// How numbers are rendered in the `*_display` fields of responses.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FormattingConfig {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        let pt_br = NumberLocale::pt_br();
        Self {
            currency_symbol: pt_br.currency_symbol,
            thousands_separator: pt_br.thousands_separator,
            decimal_separator: pt_br.decimal_separator,
        }
    }
}

impl FormattingConfig {
    pub fn to_locale(&self) -> NumberLocale {
        NumberLocale {
            currency_symbol: self.currency_symbol.clone(),
            thousands_separator: self.thousands_separator,
            decimal_separator: self.decimal_separator,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/metas.db"

[server]
host = "0.0.0.0"
port = 3000

[logging]
dir = "target/logs"
file = "backend.log"

[formatting]
currency_symbol = "R$"
thousands_separator = "."
decimal_separator = ","
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Embedded default config
///
/// Returns the path the config was read from, `None` for the embedded one.
/// Nothing is logged here: the subscriber is configured from the result.
pub fn load_config() -> anyhow::Result<(Config, Option<PathBuf>)> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                let config = parse_config(&contents)?;
                return Ok((config, Some(config_path)));
            }
        }
    }

    Ok((parse_config(DEFAULT_CONFIG)?, None))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Make the loaded config available process-wide. Later calls are ignored.
pub fn init(config: Config) {
    let _ = CONFIG.set(config);
}

/// Locale for formatted values; pt-BR until [`init`] runs.
pub fn number_locale() -> NumberLocale {
    CONFIG
        .get()
        .map(|c| c.formatting.to_locale())
        .unwrap_or_default()
}

/// Resolve a configured path: absolute paths as is, relative ones against
/// the executable directory.
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(path_str)
}
