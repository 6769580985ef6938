//! # Cipher-Kit: RSA + AES Cryptographic Services
//!
//! `cipher-kit` is a cryptographic facade library for the common two-party
//! workflows: encrypt a payload for a recipient with RSA, protect bulk data
//! with an AES key, derive that key from a password, and verify content with
//! SHA-256 digests or HMAC tags.
//!
//! It hides the primitive-level details (padding schemes, nonce handling,
//! PEM framing) behind two small services and a handful of pure utility
//! functions, so callers never touch a cipher object directly.
//!
//! ## Core Concepts
//!
//! - **[`RsaService`]**: key-pair generation, PEM serialization (optionally
//!   password-protected), and block-chunked encrypt/decrypt with either half
//!   of a key pair.
//! - **[`AesService`]**: AES-256-GCM with random or password-derived keys,
//!   over byte slices or arbitrary `Read`/`Write` streams.
//! - **`common` utilities**: SHA-256 digesting, hex encoding, HMAC-SHA-256
//!   and constant-time comparison for verifying the results.
//!
//! ## Quick Start
//!
//! ```rust
//! use cipher_kit::{AesService, constant_time_eq};
//! use cipher_kit::common::digest;
//!
//! fn main() -> Result<(), cipher_kit::Error> {
//!     let mut aes = AesService::new();
//!     aes.generate_key()?;
//!
//!     let plaintext = b"Hello, Cipher-Kit!";
//!     let ciphertext = aes.encode(plaintext)?;
//!     let decrypted = aes.decode(&ciphertext)?;
//!
//!     let before = digest::sha256(plaintext);
//!     let after = digest::sha256(&decrypted);
//!     assert!(constant_time_eq(before.as_bytes(), after.as_bytes()));
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Services keep their active key and random source as instance state. Key
//! mutation requires `&mut self`; encode/decode borrow immutably. A single
//! instance is not meant to be shared across threads; create one instance
//! per caller instead, they are fully independent.

pub mod asymmetric;
pub mod common;
pub mod symmetric;

pub use common::errors::Error;
pub use common::streaming::{StreamingConfig, StreamingResult};
pub use common::utils::constant_time_eq;

pub use symmetric::aes::{AES_KEY_SIZE, AesKey, AesService, SALT_SIZE};
pub use symmetric::errors::SymmetricError;

pub use asymmetric::errors::AsymmetricError;
pub use asymmetric::rsa::{
    RsaCipherKey, RsaKeySize, RsaPrivateKeyWrapper, RsaPublicKeyWrapper, RsaService,
};

/// The version of the `cipher-kit` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
