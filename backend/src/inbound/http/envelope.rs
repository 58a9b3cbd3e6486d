//! Success envelopes shared by the JSON handlers.
//!
//! Successful responses are `{"success": true, "message"?, "data"?}`; token
//! responses add `token`. Error responses use [`crate::domain::Error`].

use serde::Serialize;

/// `{"success": true, "message"?, "data"?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl Envelope<()> {
    /// Bare acknowledgement: `{"success": true}`.
    pub fn ack() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// Acknowledgement with a message.
    pub fn message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn data_with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// `{"success": true, "message", "token"}` returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenEnvelope {
    success: bool,
    message: &'static str,
    token: String,
}

impl TokenEnvelope {
    pub fn new(message: &'static str, token: String) -> Self {
        Self {
            success: true,
            message,
            token,
        }
    }
}
