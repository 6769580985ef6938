//! HMAC-SHA-256 消息认证
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 以 UTF-8 编码的文本密钥计算文本消息的 HMAC-SHA-256，返回小写十六进制字符串
///
/// 验证方重新计算后必须使用
/// [`constant_time_eq`](crate::common::utils::constant_time_eq)
/// 比较两个结果，不要使用普通的字符串相等。
pub fn hmac_sha256(message: &str, key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    ::hex::encode(mac.finalize().into_bytes())
}
