//! 通用模块，包含错误处理、摘要与编码工具和流式处理配置

pub mod digest;
pub mod errors;
pub mod hex;
pub mod mac;
pub mod streaming;
pub mod utils;

pub use self::errors::Error;
pub use self::streaming::{StreamingConfig, StreamingResult};
pub use self::utils::constant_time_eq;
