use std::collections::HashMap;
use std::fs;
use std::io::{Error, ErrorKind};
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;

const KEYS: [&str; 3] = ["HOST", "PORT", "SHUTDOWN_TIMEOUT_SECONDS"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS),
        }
    }
}

impl Config {
    /// Reads settings from the given file only. The file must exist.
    pub fn from_env_file(path: &str) -> Result<Self, Error> {
        let vars = load_dotenv(path)?;
        Self::from_vars(&vars)
    }

    /// Layers defaults, then `path` if it exists, then the process environment.
    pub fn load(path: &str) -> Result<Self, Error> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading overrides through `env` instead of the process environment.
    pub fn load_with(path: &str, env: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut vars = match load_dotenv(path) {
            Ok(vars) => vars,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        for key in KEYS {
            if let Some(value) = env(key) {
                vars.insert(key.to_string(), value.trim().to_string());
            }
        }

        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, Error> {
        let defaults = Config::default();

        let host = match vars.get("HOST") {
            Some(s) if s.is_empty() => {
                return Err(invalid_input("HOST must not be empty".to_string()));
            }
            Some(s) => s.clone(),
            None => defaults.host,
        };

        let port = match vars.get("PORT") {
            Some(s) => s
                .parse()
                .ok()
                .filter(|port: &u16| *port != 0)
                .ok_or_else(|| invalid_input(format!("PORT must be in 1..=65535, got {s}")))?,
            None => defaults.port,
        };

        let shutdown_timeout = match vars.get("SHUTDOWN_TIMEOUT_SECONDS") {
            Some(s) => s.parse().map(Duration::from_secs).map_err(|_| {
                invalid_input(format!("SHUTDOWN_TIMEOUT_SECONDS must be a whole number, got {s}"))
            })?,
            None => defaults.shutdown_timeout,
        };

        Ok(Config {
            host,
            port,
            shutdown_timeout,
        })
    }

    /// Host name or IP plus port, resolved when the listener binds.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn invalid_input(message: String) -> Error {
    Error::new(ErrorKind::InvalidInput, message)
}

fn load_dotenv(path: &str) -> Result<HashMap<String, String>, Error> {
    let mut vars: HashMap<String, String> = HashMap::new();
    let content = fs::read_to_string(path)?;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(vars)
}
