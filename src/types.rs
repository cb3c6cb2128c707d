use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Decoded JSON body returned by the service. The client does not interpret it.
pub type ApiResponse = serde_json::Value;

/// Character set of a generated token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    #[default]
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "alphanumeric")]
    Alphanumeric,
    #[serde(rename = "alpha")]
    Alphabetic,
}

impl TokenType {
    pub const ALL: [TokenType; 3] = [Self::Numeric, Self::Alphanumeric, Self::Alphabetic];

    /// Canonical string sent on the wire
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Alphabetic => "alpha",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for TokenType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "alphanumeric" => Ok(Self::Alphanumeric),
            "alpha" | "alphabetic" => Ok(Self::Alphabetic),
            other => Err(Error::InvalidArgument(format!(
                "unsupported token type `{other}` (expected numeric, alphanumeric or alpha)"
            ))),
        }
    }
}

/// Body of `POST /generate`.
///
/// Defaults: numeric, 4 characters, valid for 5 minutes, no delivery, no
/// identifier. `delivery` and `identifier` are always sent, as `null` when
/// unset. Length and validity are not range-checked here; the service
/// rejects values it does not accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOtpRequest {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub token_length: u32,
    /// Minutes
    pub validity: u32,
    /// Opaque delivery options (channel, address, ...)
    pub delivery: Option<serde_json::Value>,
    pub identifier: Option<String>,
}

impl Default for GenerateOtpRequest {
    fn default() -> Self {
        Self {
            token_type: TokenType::Numeric,
            token_length: 4,
            validity: 5,
            delivery: None,
            identifier: None,
        }
    }
}

impl GenerateOtpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn token_length(mut self, token_length: u32) -> Self {
        self.token_length = token_length;
        self
    }

    pub fn validity(mut self, minutes: u32) -> Self {
        self.validity = minutes;
        self
    }

    pub fn delivery(mut self, delivery: serde_json::Value) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Body of `POST /validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateOtpRequest {
    pub identifier: String,
    pub token: String,
}
