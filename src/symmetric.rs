//! 对称加密服务：AES-256-GCM，支持随机密钥与密码派生密钥

pub mod aes;
pub mod errors;
pub mod streaming;

pub use self::aes::{AES_KEY_SIZE, AesKey, AesService, SALT_SIZE};
pub use self::errors::SymmetricError;
