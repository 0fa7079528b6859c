use lazycron_data::Rejection;

/// Failure of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("service rejected the request (errno {errno}): {message}")]
    Rejected { errno: i64, message: String },
    #[error("request superseded")]
    Cancelled,
}

impl GatewayError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> GatewayError {
        if value.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(value)
        }
    }
}

impl From<Rejection> for GatewayError {
    fn from(Rejection { errno, message }: Rejection) -> GatewayError {
        GatewayError::Rejected { errno, message }
    }
}

/// Failure of an operator action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("no job named {0:?} is displayed")]
    UnknownJob(String),
    #[error("the job editor is not open")]
    EditorClosed,
}

impl DispatchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DispatchError::Gateway(err) if err.is_cancelled())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read ({path}): {inner}")]
    File {
        path: String,
        inner: std::io::Error,
    },
    #[error("could not parse: {0}")]
    Parsing(#[from] serde_json::Error),
    #[error("bad server url ({server}): {reason}")]
    Url { server: String, reason: String },
    #[error("timeout must be positive")]
    Timeout,
    #[error("log limit must be positive")]
    LogLimit,
}

impl ConfigError {
    pub(crate) fn file(path: String, inner: std::io::Error) -> Self {
        ConfigError::File { path, inner }
    }
}
