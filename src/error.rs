use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct Error {
    pub code: i32,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    EnvVar,
    Config,
    Network,
    Provider,
    Unexpected,
    AggregateFetch,
    InvalidInput,
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self.code {
            1 => ErrorKind::EnvVar,
            2 => ErrorKind::Config,
            3 => ErrorKind::Network,
            4 => ErrorKind::Provider,
            6 => ErrorKind::AggregateFetch,
            101 => ErrorKind::InvalidInput,
            102 => ErrorKind::NotFound,
            _ => ErrorKind::Unexpected,
        }
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        network_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.kind() {
            ErrorKind::Network | ErrorKind::Provider | ErrorKind::AggregateFetch => {
                (StatusCode::BAD_GATEWAY, self.message.as_str())
            }
            ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, self.message.as_str()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error(reason: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: format!("invalid input: {}", reason.into()),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 102,
        message: "not found".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn config_error(name: &str, value: &str) -> Error {
    Error {
        code: 2,
        message: format!("invalid configuration value for {}: {:?}", name, value),
    }
}

pub fn network_error<T: Debug>(err: T) -> Error {
    tracing::debug!("transport failure: {:?}", err);

    Error {
        code: 3,
        message: "network error".into(),
    }
}

pub fn provider_error(status: &str, detail: Option<&str>) -> Error {
    let message = match detail {
        Some(detail) => format!("provider error: {} ({})", status, detail),
        None => format!("provider error: {}", status),
    };

    Error { code: 4, message }
}

pub fn unexpected_error<T: Debug>(err: T) -> Error {
    tracing::error!("unexpected error: {:?}", err);

    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn aggregate_fetch_error(attempted: usize, last: Option<&Error>) -> Error {
    let message = match last {
        Some(last) => format!(
            "all {} nearby-place lookups failed, last: {}",
            attempted, last.message
        ),
        None => format!("all {} nearby-place lookups failed", attempted),
    };

    Error { code: 6, message }
}
