use std::{env, fs, ops::Deref, path::Path, str::FromStr, sync::Arc};

use tracing::{info, Level};
use url::Url;

use crate::{error::Error, helpers::BackendMode, provider::Backend};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub backend: Backend,
}

impl State {
    pub fn new(config: Config) -> Result<State, Error> {
        let backend = Backend::new(&config)?;
        info!("Using {} backend", backend.mode());
        Ok(Self { config, backend })
    }

    pub fn with_backend(config: Config, backend: Backend) -> State {
        Self { config, backend }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<String>,
    pub backend_mode: BackendMode,
    pub api_base_url: String,
    pub timeout: u64,
    pub mock_latency_ms: u64,
    pub seed_demo_data: bool,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: String::from("127.0.0.1"),
            port: 8080,
            allowed_origins: vec![String::from("*")],
            static_dir: None,
            backend_mode: BackendMode::Mock,
            api_base_url: String::from("http://127.0.0.1:8081/"),
            timeout: 30,
            mock_latency_ms: 0,
            seed_demo_data: true,
            log_level: Level::INFO,
        }
    }
}

fn var_or(key: &str, default: &str) -> Result<String, Error> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_owned()),
        Err(e) => Err(Error::VAR(e)),
    }
}

/// Base URLs are joined with relative paths, so they must end with `/`.
pub fn parse_base_url(value: &str) -> Result<Url, Error> {
    let value = value.trim();
    let url = if value.ends_with('/') {
        Url::parse(value)?
    } else {
        Url::parse(&format!("{}/", value))?
    };

    Ok(url)
}

pub fn get_configuration() -> Result<Config, Error> {
    let server_host = var_or("SERVER_HOST", "127.0.0.1")?;
    let port: u16 = var_or("PORT", "8080")?.parse()?;
    let allowed_origins = var_or("ALLOWED_ORIGINS", "*")?
        .split(',')
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect::<Vec<String>>();
    let static_dir = match env::var("STATIC_DIRECTORY") {
        Ok(dir) if !dir.trim().is_empty() => Some(dir),
        _ => None,
    };

    // anything but an explicit "false" keeps the simulated backend
    let backend_mode = if var_or("USE_MOCK_API", "true")?.trim() == "false" {
        BackendMode::Remote
    } else {
        BackendMode::Mock
    };
    let api_base_url =
        parse_base_url(&var_or("API_BASE_URL", "http://127.0.0.1:8081")?)?
            .to_string();
    let timeout: u64 = var_or("TIMEOUT", "30")?.parse()?;
    let mock_latency_ms: u64 = var_or("MOCK_LATENCY_MS", "0")?.parse()?;
    let seed_demo_data: bool = var_or("SEED_DEMO_DATA", "true")?.parse()?;
    let log_level = Level::from_str(&var_or("LOG_LEVEL", "info")?)
        .map_err(|e| Error::ConfigurationError(format!("LOG_LEVEL: {}", e)))?;

    let config = Config {
        server_host,
        port,
        allowed_origins,
        static_dir,
        backend_mode,
        api_base_url,
        timeout,
        mock_latency_ms,
        seed_demo_data,
        log_level,
    };

    Ok(config)
}

/// Loads `KEY=VALUE` lines from `.env` beside the manifest into the process
/// environment. Variables already set take precedence. A missing file is not
/// an error.
pub fn set_configuration() -> Result<(), Error> {
    let directory = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(directory).join(".env");

    if !path.exists() {
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;
    for (key, value) in parse_config_string(&config_string) {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_string() {
        let data = "# comment\nPORT=9000\n\nUSE_MOCK_API = false\nbroken line\nAPI_BASE_URL=http://a/b?x=1\n";
        let parsed = parse_config_string(data);

        assert_eq!(
            parsed,
            vec![
                ("PORT", "9000"),
                ("USE_MOCK_API", "false"),
                ("API_BASE_URL", "http://a/b?x=1"),
            ]
        );
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("https://scoring.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://scoring.example.com/v1/");
        assert_eq!(
            url.join("api/credit-score").unwrap().as_str(),
            "https://scoring.example.com/v1/api/credit-score"
        );

        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_default_config_uses_mock_backend() {
        let config = Config::default();
        assert_eq!(config.backend_mode, BackendMode::Mock);
        assert!(config.seed_demo_data);
        assert_eq!(config.allowed_origins, vec![String::from("*")]);
    }
}
