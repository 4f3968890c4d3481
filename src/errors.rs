use derive_more::derive::{Display, Error as DeriveMoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError{
    #[error("BACKEND_URL is not a valid URL")]
    BadBackendUrl,
    #[error("Cant read the session file")]
    SessionRead,
    #[error("Cant write the session file")]
    SessionWrite,
    #[error("Cant build the http client")]
    HttpClient,
    #[error("Cant read from stdin")]
    Stdin,
}

// error body the backend sends alongside non-2xx statuses
#[derive(Debug, Display, DeriveMoreError, Serialize, Deserialize)]
#[display("error :{}", message)]
pub struct ErrorPayload{
    pub message: String
}

#[derive(Debug, Error, PartialEq)]
pub enum ApiError{
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a create request is already in flight")]
    Busy,
    #[error("{0}")]
    Server(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response from server")]
    Decode,
}

impl ApiError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode(){
            return ApiError::Decode;
        }
        ApiError::Network(err.to_string())
    }

    // non-2xx: prefer the server's own message, fall back to the status line
    pub fn from_status(status: reqwest::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorPayload>(body) {
            Ok(payload) => ApiError::Server(payload.message),
            Err(_) => ApiError::Server(format!("request failed with status {}", status)),
        }
    }
}
