use thiserror::Error;

/// 对称加密服务的独立错误类型
#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("No key has been established for this service")]
    KeyNotInitialized,

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid salt size: expected {expected}, got {actual}")]
    InvalidSaltSize { expected: usize, actual: usize },

    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Ciphertext is malformed or truncated: {0}")]
    MalformedCiphertext(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
