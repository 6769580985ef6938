//! Defines the crate-level error type.

use crate::asymmetric::errors::AsymmetricError;
use crate::symmetric::errors::SymmetricError;
use thiserror::Error;

/// 加密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Invalid data format: {0}")]
    Format(String),

    #[error("Asymmetric cryptographic error")]
    Asymmetric(#[from] AsymmetricError),

    #[error("Symmetric cryptographic error")]
    Symmetric(#[from] SymmetricError),
}

// thiserror 自动处理 Display, StdError 和所有 #[from] 的实现

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Format(format!("UTF-8 conversion error: {}", err))
    }
}
