//! Generate ES256-signed client secrets for Sign in with Apple.
//!
//! ```no_run
//! use apple_client_secret::SignerConfig;
//!
//! let signer = SignerConfig::from_key_file(
//!     "com.example.app",
//!     "TEAMID1234",
//!     "KEYID5678",
//!     "AuthKey_KEYID5678.p8",
//!     None,
//! )?;
//! let client_secret = signer.generate()?;
//! # Ok::<(), apple_client_secret::SecretError>(())
//! ```

pub mod config;
pub mod error;
pub mod secret;

pub use error::{Result, SecretError};
pub use secret::{
    generate, generate_at, unix_now, SignerConfig, APPLE_AUDIENCE, DEFAULT_TTL_SECONDS,
    MAX_TTL_SECONDS,
};
