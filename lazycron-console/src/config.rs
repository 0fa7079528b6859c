use std::time::Duration;

use log::info;

use crate::{error::ConfigError, gateway::LogPage};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct SerializedConfig {
    server: String,
    timeout_ms: u64,
    log_limit: u32,
}

impl Default for SerializedConfig {
    fn default() -> Self {
        SerializedConfig {
            server: String::from("http://127.0.0.1:8070"),
            timeout_ms: 10_000,
            log_limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base url of the service, without trailing slash
    pub server: String,
    pub timeout: Duration,
    pub log_page: LogPage,
}

impl ConsoleConfig {
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        info!("Reading config from: {}", path);
        let file =
            std::fs::File::open(path).map_err(|err| ConfigError::file(String::from(path), err))?;
        let serde_config: SerializedConfig = serde_json::from_reader(file)?;
        Self::try_from(serde_config)
    }

    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let serde_config: SerializedConfig = serde_json::from_str(json)?;
        Self::try_from(serde_config)
    }

    pub fn with_server(self, server: &str) -> Result<Self, ConfigError> {
        let server = validate_server(server)?;
        Ok(ConsoleConfig { server, ..self })
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let SerializedConfig {
            server,
            timeout_ms,
            log_limit,
        } = SerializedConfig::default();
        ConsoleConfig {
            server,
            timeout: Duration::from_millis(timeout_ms),
            log_page: LogPage {
                skip: 0,
                limit: log_limit,
            },
        }
    }
}

impl TryFrom<SerializedConfig> for ConsoleConfig {
    type Error = ConfigError;

    fn try_from(
        SerializedConfig {
            server,
            timeout_ms,
            log_limit,
        }: SerializedConfig,
    ) -> Result<Self, Self::Error> {
        let server = validate_server(&server)?;
        if timeout_ms == 0 {
            return Err(ConfigError::Timeout);
        }
        if log_limit == 0 {
            return Err(ConfigError::LogLimit);
        }
        Ok(ConsoleConfig {
            server,
            timeout: Duration::from_millis(timeout_ms),
            log_page: LogPage {
                skip: 0,
                limit: log_limit,
            },
        })
    }
}

fn validate_server(server: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(server).map_err(|err| ConfigError::Url {
        server: server.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(server.trim_end_matches('/').to_string()),
        scheme => Err(ConfigError::Url {
            server: server.to_string(),
            reason: format!("unsupported scheme {scheme}"),
        }),
    }
}
