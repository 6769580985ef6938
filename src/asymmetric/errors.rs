use thiserror::Error;

/// 非对称加密服务的独立错误类型
#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    #[error("The private key requires a password, or the supplied password was incorrect")]
    WrongPassword,

    #[error("A password is required when exporting a {0}-bit private key")]
    PasswordRequired(usize),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Ciphertext is malformed or truncated: {0}")]
    MalformedCiphertext(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
