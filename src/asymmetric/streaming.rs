//! 非对称加密的流式处理实现
//!
//! 加密端每读满一个 `modulus_len - 11` 字节的明文块就写出一个
//! `modulus_len` 字节的密文块；密文块大小固定且自定界，因此不需要
//! 额外的长度前缀。解密端按模数大小逐块读取，末尾出现不完整的块
//! 即视为密文被截断。
use std::io::{self, Read, Write};

use rand_core::CryptoRngCore;

use crate::asymmetric::errors::AsymmetricError;
use crate::asymmetric::rsa::RsaCipherKey;
use crate::common::errors::Error;
use crate::common::streaming::{StreamingConfig, StreamingResult};

/// 反复读取直到填满缓冲区或到达 EOF，返回实际读取的字节数
fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let read_bytes = reader.read(&mut buf[filled..])?;
        if read_bytes == 0 {
            break;
        }
        filled += read_bytes;
    }
    Ok(filled)
}

/// RSA 流式加密器
pub struct RsaStreamingEncryptor<'a, K: RsaCipherKey, R: CryptoRngCore, Rd: Read, W: Write> {
    reader: Rd,
    writer: W,
    key: &'a K,
    config: &'a StreamingConfig,
    rng: &'a mut R,
    bytes_processed: u64,
}

impl<'a, K: RsaCipherKey, R: CryptoRngCore, Rd: Read, W: Write>
    RsaStreamingEncryptor<'a, K, R, Rd, W>
{
    /// 创建新的 RSA 流式加密器
    pub fn new(
        reader: Rd,
        writer: W,
        key: &'a K,
        config: &'a StreamingConfig,
        rng: &'a mut R,
    ) -> Self {
        Self {
            reader,
            writer,
            key,
            config,
            rng,
            bytes_processed: 0,
        }
    }

    /// 执行流式加密
    pub fn process(mut self) -> Result<StreamingResult, Error> {
        // 明文块大小由密钥决定，与 config.buffer_size 无关
        let mut buffer = vec![0u8; self.key.max_chunk_len()];
        let mut mem_buffer = if self.config.keep_in_memory {
            Some(Vec::new())
        } else {
            None
        };

        loop {
            let read_bytes = read_fill(&mut self.reader, &mut buffer)?;
            if read_bytes == 0 {
                break;
            }
            self.bytes_processed += read_bytes as u64;

            let block = self
                .key
                .encrypt_block(&mut *self.rng, &buffer[..read_bytes])?;
            self.writer.write_all(&block)?;

            if let Some(ref mut buf) = mem_buffer {
                buf.extend_from_slice(&block);
            }

            if let Some(cb) = &self.config.progress_callback {
                cb(self.bytes_processed, self.config.total_bytes);
            }
        }

        self.writer.flush()?;
        Ok(StreamingResult {
            bytes_processed: self.bytes_processed,
            buffer: mem_buffer,
        })
    }
}

/// RSA 流式解密器
pub struct RsaStreamingDecryptor<'a, K: RsaCipherKey, Rd: Read, W: Write> {
    reader: Rd,
    writer: W,
    key: &'a K,
    config: &'a StreamingConfig,
    bytes_written: u64,
}

impl<'a, K: RsaCipherKey, Rd: Read, W: Write> RsaStreamingDecryptor<'a, K, Rd, W> {
    /// 创建新的 RSA 流式解密器
    pub fn new(reader: Rd, writer: W, key: &'a K, config: &'a StreamingConfig) -> Self {
        Self {
            reader,
            writer,
            key,
            config,
            bytes_written: 0,
        }
    }

    /// 执行流式解密
    pub fn process(mut self) -> Result<StreamingResult, Error> {
        let block_len = self.key.modulus_len();
        let mut block = vec![0u8; block_len];
        let mut mem_buffer = if self.config.keep_in_memory {
            Some(Vec::new())
        } else {
            None
        };
        let mut bytes_read = 0u64;

        loop {
            let read_bytes = read_fill(&mut self.reader, &mut block)?;
            if read_bytes == 0 {
                break;
            }
            if read_bytes != block_len {
                return Err(AsymmetricError::MalformedCiphertext(
                    "stream ended inside a ciphertext block".to_string(),
                )
                .into());
            }
            bytes_read += read_bytes as u64;

            let plaintext = self.key.decrypt_block(&block)?;
            self.writer.write_all(&plaintext)?;
            self.bytes_written += plaintext.len() as u64;

            if let Some(ref mut buf) = mem_buffer {
                buf.extend_from_slice(&plaintext);
            }

            if let Some(cb) = &self.config.progress_callback {
                // 解密进度按从源流读取的字节数计算
                cb(bytes_read, self.config.total_bytes);
            }
        }

        self.writer.flush()?;
        Ok(StreamingResult {
            bytes_processed: self.bytes_written,
            buffer: mem_buffer,
        })
    }
}
