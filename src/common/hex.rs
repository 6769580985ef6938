//! 十六进制编码与解码
use crate::common::errors::Error;

/// 将字节序列编码为小写十六进制字符串
pub fn encode(data: &[u8]) -> String {
    ::hex::encode(data)
}

/// 解码十六进制字符串
///
/// 字符串长度为奇数或包含非十六进制字符时返回 [`Error::Format`]。
pub fn decode(data: &str) -> Result<Vec<u8>, Error> {
    ::hex::decode(data).map_err(|e| Error::Format(format!("invalid hex input: {}", e)))
}
