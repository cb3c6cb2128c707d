//! Async client for the FastOTP one-time-password service.
//!
//! The service does all OTP generation, storage and validation; this crate
//! only formats the three HTTP calls and hands back the decoded JSON.
//!
//! ```no_run
//! use fastotp_rs::{FastOtpClient, GenerateOtpRequest, TokenType};
//!
//! #[tokio::main]
//! async fn main() -> fastotp_rs::Result<()> {
//!     let client = FastOtpClient::new("your-api-key")?;
//!
//!     let otp = client
//!         .generate_otp(
//!             &GenerateOtpRequest::new()
//!                 .token_type(TokenType::Alphanumeric)
//!                 .identifier("user-1"),
//!         )
//!         .await?;
//!     println!("{otp}");
//!
//!     let result = client.validate_otp("user-1", "A1B2").await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FastOtpClient, FastOtpConfig};
pub use error::{Error, RequestFailure, Result};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
pub use types::{ApiResponse, GenerateOtpRequest, TokenType, ValidateOtpRequest};
