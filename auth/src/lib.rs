//! Authentication utilities library
//!
//! Provides the credential primitives used by the auth service:
//! - Password hashing (Argon2id, configurable cost)
//! - Short-lived HS256 bearer tokens (issue and validate)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_memory(1, 1024).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let issued = issuer.issue("user123").unwrap();
//! let claims = issuer.validate(&issued.token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenIssuer};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::with_memory(1, 1024).unwrap(),
//!     TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15)),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
