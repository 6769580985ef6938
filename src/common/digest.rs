//! SHA-256 内容摘要，输出小写十六进制字符串
use std::io::Read;

use sha2::{Digest, Sha256};

use crate::common::errors::Error;

/// 读取流时使用的缓冲区大小
const READ_BUFFER_SIZE: usize = 65536;

/// 计算字节切片的 SHA-256 摘要，返回 64 位小写十六进制字符串
pub fn sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    ::hex::encode(hasher.finalize())
}

/// 计算整个输入流的 SHA-256 摘要
///
/// 流会被读取至 EOF，但任一时刻只在内存中保留一个固定大小的缓冲区。
pub fn sha256_reader<R: Read>(mut reader: R) -> Result<String, Error> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read_bytes = reader.read(&mut buffer)?;
        if read_bytes == 0 {
            break;
        }
        hasher.update(&buffer[..read_bytes]);
    }

    Ok(::hex::encode(hasher.finalize()))
}
