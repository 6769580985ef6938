//! 非对称加密服务：RSA 密钥对生成、PEM 序列化与分块加解密

pub mod errors;
pub mod rsa;
pub mod streaming;

pub use self::errors::AsymmetricError;
pub use self::rsa::{RsaCipherKey, RsaKeySize, RsaPrivateKeyWrapper, RsaPublicKeyWrapper, RsaService};
