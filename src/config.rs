//! Runtime configuration, read from the environment (and an optional `.env`).
//!
//! | Variable                | Default                                        |
//! |-------------------------|------------------------------------------------|
//! | `RENTAL_DATA_FILE`      | `imoveis.csv`                                  |
//! | `RENTAL_BIND_ADDR`      | `127.0.0.1:3000`                               |
//! | `RENTAL_MAX_WORKERS`    | `1`                                            |
//! | `GEOCODER_URL`          | `https://nominatim.openstreetmap.org/search`   |
//! | `GEOCODER_USER_AGENT`   | [`DEFAULT_GEOCODER_USER_AGENT`]                |
//! | `GEOCODER_TIMEOUT_SECS` | `10`                                           |
//! | `FETCH_TIMEOUT_SECS`    | `10`                                           |
//! | `GROQ_API_KEY`          | unset: auto-fill disabled                      |
//! | `GROQ_BASE_URL`         | `https://api.groq.com/openai/v1`               |
//! | `GROQ_MODEL`            | `llama3-8b-8192`                               |
//! | `LLM_TIMEOUT_SECS`      | `30`                                           |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATA_FILE: &str = "imoveis.csv";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_GEOCODER_USER_AGENT: &str =
    "rental-visits/0.1 (personal rental visit log; set GEOCODER_USER_AGENT to add contact info)";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

/// Browser-like identity for page fetches; some listing sites block anything else.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub geocoder: GeocoderConfig,
    pub fetch: FetchConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_workers: usize = parse_or(&get, "RENTAL_MAX_WORKERS", 1, "a positive integer")?;
        if max_workers == 0 {
            return Err(ConfigError::Invalid {
                key: "RENTAL_MAX_WORKERS",
                value: "0".to_string(),
                expected: "a positive integer",
            });
        }

        let bind_addr = match get("RENTAL_BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "RENTAL_BIND_ADDR",
                value: v.clone(),
                expected: "a socket address like 127.0.0.1:3000",
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        Ok(Self {
            data_file: get("RENTAL_DATA_FILE")
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
                .into(),
            bind_addr,
            max_workers,
            geocoder: GeocoderConfig {
                url: get("GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
                user_agent: get("GEOCODER_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_GEOCODER_USER_AGENT.to_string()),
                timeout: secs(&get, "GEOCODER_TIMEOUT_SECS", 10)?,
            },
            fetch: FetchConfig {
                user_agent: BROWSER_USER_AGENT.to_string(),
                timeout: secs(&get, "FETCH_TIMEOUT_SECS", 10)?,
            },
            llm: LlmConfig {
                api_key: get("GROQ_API_KEY"),
                base_url: get("GROQ_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
                model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
                timeout: secs(&get, "LLM_TIMEOUT_SECS", 30)?,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: v,
            expected,
        }),
        None => Ok(default),
    }
}

fn secs<G>(get: &G, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let n: u64 = parse_or(get, key, default, "a whole number of seconds")?;
    if n == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            expected: "a timeout of at least one second",
        });
    }
    Ok(Duration::from_secs(n))
}
