//! 对称加密的流式处理实现
//!
//! 输出是一串记录，每条记录为 `u32-LE 长度前缀 ‖ (nonce ‖ tag ‖ 密文)`，
//! 对应一个有界大小的明文块。任一时刻内存中只保留一个块。
use std::io::{ErrorKind, Read, Write};

use rand_core::CryptoRngCore;

use crate::common::errors::Error;
use crate::common::streaming::{StreamingConfig, StreamingResult};
use crate::symmetric::aes::{AesKey, NONCE_SIZE, TAG_SIZE, open_chunk, seal_chunk};
use crate::symmetric::errors::SymmetricError;

/// 对称流式加密器
pub struct SymmetricStreamingEncryptor<'a, R: CryptoRngCore, Rd: Read, W: Write> {
    reader: Rd,
    writer: W,
    key: &'a AesKey,
    config: &'a StreamingConfig,
    rng: &'a mut R,
    bytes_processed: u64,
}

impl<'a, R: CryptoRngCore, Rd: Read, W: Write> SymmetricStreamingEncryptor<'a, R, Rd, W> {
    /// 创建新的对称流式加密器
    pub fn new(
        reader: Rd,
        writer: W,
        key: &'a AesKey,
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
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut mem_buffer = if self.config.keep_in_memory {
            Some(Vec::new())
        } else {
            None
        };

        loop {
            let read_bytes = self.reader.read(&mut buffer)?;
            if read_bytes == 0 {
                break;
            }
            self.bytes_processed += read_bytes as u64;

            let record = seal_chunk(self.key, &mut *self.rng, &buffer[..read_bytes])?;
            let len = record.len() as u32;
            self.writer.write_all(&len.to_le_bytes())?;
            self.writer.write_all(&record)?;

            if let Some(ref mut buf) = mem_buffer {
                buf.extend_from_slice(&len.to_le_bytes());
                buf.extend_from_slice(&record);
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

/// 对称流式解密器
pub struct SymmetricStreamingDecryptor<'a, Rd: Read, W: Write> {
    reader: Rd,
    writer: W,
    key: &'a AesKey,
    config: &'a StreamingConfig,
    bytes_written: u64,
}

impl<'a, Rd: Read, W: Write> SymmetricStreamingDecryptor<'a, Rd, W> {
    /// 创建新的对称流式解密器
    pub fn new(reader: Rd, writer: W, key: &'a AesKey, config: &'a StreamingConfig) -> Self {
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
        let mut mem_buffer = if self.config.keep_in_memory {
            Some(Vec::new())
        } else {
            None
        };
        let mut len_buf = [0u8; 4];
        let mut bytes_read = 0u64;

        loop {
            // 记录边界处的 EOF 表示流正常结束
            match self.reader.read_exact(&mut len_buf) {
                Ok(_) => (),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let record_size = u32::from_le_bytes(len_buf) as usize;
            if record_size < NONCE_SIZE + TAG_SIZE {
                return Err(SymmetricError::MalformedCiphertext(
                    "record is too short to contain a nonce and tag".to_string(),
                )
                .into());
            }

            let mut record = vec![0u8; record_size];
            self.reader.read_exact(&mut record).map_err(|e| {
                if e.kind() == ErrorKind::UnexpectedEof {
                    Error::from(SymmetricError::MalformedCiphertext(
                        "stream ended inside an encrypted record".to_string(),
                    ))
                } else {
                    Error::from(e)
                }
            })?;
            bytes_read += (4 + record_size) as u64;

            let plaintext = open_chunk(self.key, &record)?;
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
