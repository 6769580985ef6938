//! AES-256-GCM 对称加密服务
//!
//! 密文布局为 `nonce ‖ tag ‖ 密文`，每次加密使用新的随机 nonce，
//! 解密端从密文前缀自行恢复 nonce。
use std::cell::RefCell;
use std::io::{Read, Write};

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce, Tag};
use argon2::Argon2;
use rand_core::{CryptoRngCore, OsRng};
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use crate::common::errors::Error;
use crate::common::streaming::{StreamingConfig, StreamingResult};
use crate::common::utils::ZeroizingVec;
use crate::symmetric::errors::SymmetricError;
use crate::symmetric::streaming::{SymmetricStreamingDecryptor, SymmetricStreamingEncryptor};

/// 密钥长度（256 位）
pub const AES_KEY_SIZE: usize = 32;
/// 密码派生密钥时要求的盐长度
pub const SALT_SIZE: usize = 32;

pub(crate) const NONCE_SIZE: usize = 12;
pub(crate) const TAG_SIZE: usize = 16; // AES-GCM's tag is 16 bytes

/// AES 密钥的包装，离开作用域时自动擦除
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AesKey(ZeroizingVec);

impl AesKey {
    /// 从原始字节导入密钥，长度必须恰好为 [`AES_KEY_SIZE`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SymmetricError> {
        if bytes.len() != AES_KEY_SIZE {
            return Err(SymmetricError::InvalidKeySize {
                expected: AES_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(AesKey(ZeroizingVec(bytes.to_vec())))
    }

    /// 原始密钥字节，供带外传输（通常由调用方再用 RSA 包装）
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// 加密单个数据块，输出 `nonce ‖ tag ‖ 密文`
pub(crate) fn seal_chunk<R: CryptoRngCore>(
    key: &AesKey,
    rng: &mut R,
    plaintext: &[u8],
) -> Result<Vec<u8>, SymmetricError> {
    let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Aes256Gcm::generate_nonce(&mut *rng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, &[], &mut buffer)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    let mut output = Vec::with_capacity(NONCE_SIZE + TAG_SIZE + buffer.len());
    output.extend_from_slice(nonce.as_slice());
    output.extend_from_slice(&tag);
    output.extend_from_slice(&buffer);
    Ok(output)
}

/// 解密单个 `nonce ‖ tag ‖ 密文` 数据块
pub(crate) fn open_chunk(key: &AesKey, data: &[u8]) -> Result<Vec<u8>, SymmetricError> {
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(SymmetricError::MalformedCiphertext(
            "ciphertext is too short to contain a nonce and tag".to_string(),
        ));
    }

    let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let (nonce_slice, rest) = data.split_at(NONCE_SIZE);
    let (tag_slice, ct_slice) = rest.split_at(TAG_SIZE);
    let nonce = Nonce::from_slice(nonce_slice);
    let tag = Tag::from_slice(tag_slice);

    let mut buffer = ct_slice.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, &[], &mut buffer, tag)
        .map_err(|_| SymmetricError::DecryptionFailed)?;

    Ok(buffer)
}

/// AES 对称加密服务
///
/// 活动密钥保存为实例状态：设置密钥的操作需要 `&mut self`，
/// 而 `encode`/`decode` 只读借用。同一实例上的密钥设置不能与
/// 加解密并发执行（需要外部同步）；相互独立的实例可以完全并行。
///
/// 随机源可注入（默认 [`OsRng`]），测试可以通过 [`AesService::with_rng`]
/// 绑定一个确定性的随机源。
pub struct AesService<R: CryptoRngCore = OsRng> {
    key: Option<AesKey>,
    rng: RefCell<R>,
}

impl AesService<OsRng> {
    /// 创建一个尚未持有密钥的服务实例
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for AesService<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CryptoRngCore> AesService<R> {
    /// 使用指定的随机源创建服务实例
    pub fn with_rng(rng: R) -> Self {
        Self {
            key: None,
            rng: RefCell::new(rng),
        }
    }

    /// 从安全随机源生成一个新的 256 位密钥
    pub fn generate_key(&mut self) -> Result<(), SymmetricError> {
        let mut key_bytes = vec![0u8; AES_KEY_SIZE];
        self.rng
            .get_mut()
            .try_fill_bytes(&mut key_bytes)
            .map_err(|e| SymmetricError::KeyGeneration(e.to_string()))?;
        self.key = Some(AesKey(ZeroizingVec(key_bytes)));
        Ok(())
    }

    /// 从密码和盐确定性地派生一个 256 位密钥（Argon2id）
    ///
    /// 相同的密码和盐总是派生出相同的密钥；盐必须随密文一起传输，
    /// 长度必须恰好为 [`SALT_SIZE`] 字节。
    ///
    /// 密码通过 [`SecretBox`] 传入：派生结束后服务不保留任何副本，
    /// 调用方持有的缓冲区在 drop 时自动擦除。
    pub fn generate_key_from_password(
        &mut self,
        password: &SecretBox<[u8]>,
        salt: &[u8],
    ) -> Result<(), SymmetricError> {
        if salt.len() != SALT_SIZE {
            return Err(SymmetricError::InvalidSaltSize {
                expected: SALT_SIZE,
                actual: salt.len(),
            });
        }

        let mut key_bytes = vec![0u8; AES_KEY_SIZE];
        Argon2::default()
            .hash_password_into(password.expose_secret(), salt, &mut key_bytes)
            .map_err(|e| SymmetricError::KeyDerivation(e.to_string()))?;
        self.key = Some(AesKey(ZeroizingVec(key_bytes)));
        Ok(())
    }

    /// 借用当前密钥
    pub fn key(&self) -> Result<&AesKey, SymmetricError> {
        self.key.as_ref().ok_or(SymmetricError::KeyNotInitialized)
    }

    /// 导出当前密钥的原始字节（32 字节，无任何封装）
    pub fn key_bytes(&self) -> Result<Vec<u8>, SymmetricError> {
        Ok(self.key()?.as_bytes().to_vec())
    }

    /// 从原始字节导入密钥，长度必须恰好为 [`AES_KEY_SIZE`]
    pub fn set_key_bytes(&mut self, bytes: &[u8]) -> Result<(), SymmetricError> {
        self.key = Some(AesKey::from_bytes(bytes)?);
        Ok(())
    }

    /// 加密一段字节，每次调用生成新的随机 nonce
    pub fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, SymmetricError> {
        let key = self.key()?;
        let mut rng = self.rng.borrow_mut();
        seal_chunk(key, &mut *rng, plaintext)
    }

    /// 解密 [`AesService::encode`] 产生的密文
    ///
    /// 密文被截断、格式错误或认证标签校验失败时返回错误，
    /// 绝不返回未经认证的明文。
    pub fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SymmetricError> {
        open_chunk(self.key()?, ciphertext)
    }

    /// 以默认配置流式加密
    pub fn encode_stream<Rd: Read, W: Write>(
        &self,
        reader: Rd,
        writer: W,
    ) -> Result<StreamingResult, Error> {
        self.encode_stream_with_config(reader, writer, &StreamingConfig::default())
    }

    /// 流式加密：按配置的缓冲区大小分块处理，内存占用有界
    pub fn encode_stream_with_config<Rd: Read, W: Write>(
        &self,
        reader: Rd,
        writer: W,
        config: &StreamingConfig,
    ) -> Result<StreamingResult, Error> {
        let key = self.key()?;
        let mut rng = self.rng.borrow_mut();
        SymmetricStreamingEncryptor::new(reader, writer, key, config, &mut *rng).process()
    }

    /// 以默认配置流式解密
    pub fn decode_stream<Rd: Read, W: Write>(
        &self,
        reader: Rd,
        writer: W,
    ) -> Result<StreamingResult, Error> {
        self.decode_stream_with_config(reader, writer, &StreamingConfig::default())
    }

    /// 流式解密 [`AesService::encode_stream`] 产生的记录序列
    pub fn decode_stream_with_config<Rd: Read, W: Write>(
        &self,
        reader: Rd,
        writer: W,
        config: &StreamingConfig,
    ) -> Result<StreamingResult, Error> {
        let key = self.key()?;
        SymmetricStreamingDecryptor::new(reader, writer, key, config).process()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn service_with_key() -> AesService {
        let mut aes = AesService::new();
        aes.generate_key().unwrap();
        aes
    }

    fn password() -> SecretBox<[u8]> {
        SecretBox::new(Box::from(b"correct horse battery staple".as_slice()))
    }

    #[test]
    fn test_generate_key() {
        let aes = service_with_key();
        assert_eq!(aes.key_bytes().unwrap().len(), AES_KEY_SIZE);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let aes = service_with_key();
        let plaintext = b"this is a secret message";

        let ciphertext = aes.encode(plaintext).unwrap();
        let decrypted = aes.decode(&ciphertext).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_single_byte_roundtrip() {
        let aes = service_with_key();
        let ciphertext = aes.encode(b"x").unwrap();
        assert_eq!(aes.decode(&ciphertext).unwrap(), b"x");
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let aes = service_with_key();
        let ciphertext = aes.encode(b"").unwrap();
        assert_eq!(ciphertext.len(), NONCE_SIZE + TAG_SIZE);
        assert_eq!(aes.decode(&ciphertext).unwrap(), b"");
    }

    #[test]
    fn test_not_initialized() {
        let aes = AesService::new();
        assert!(matches!(
            aes.encode(b"data"),
            Err(SymmetricError::KeyNotInitialized)
        ));
        assert!(matches!(
            aes.decode(b"data"),
            Err(SymmetricError::KeyNotInitialized)
        ));
        assert!(matches!(
            aes.key_bytes(),
            Err(SymmetricError::KeyNotInitialized)
        ));
    }

    #[test]
    fn test_ciphertext_uniqueness() {
        let aes = service_with_key();
        let plaintext = b"this is the same message";

        let ciphertext1 = aes.encode(plaintext).unwrap();
        let ciphertext2 = aes.encode(plaintext).unwrap();

        assert_ne!(ciphertext1, ciphertext2);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        // 两个以相同种子初始化的服务必须产生完全相同的密钥和 nonce
        let mut a = AesService::with_rng(ChaCha20Rng::seed_from_u64(7));
        let mut b = AesService::with_rng(ChaCha20Rng::seed_from_u64(7));
        a.generate_key().unwrap();
        b.generate_key().unwrap();
        assert_eq!(a.key_bytes().unwrap(), b.key_bytes().unwrap());

        let plaintext = b"deterministic under a seeded source";
        assert_eq!(a.encode(plaintext).unwrap(), b.encode(plaintext).unwrap());
    }

    #[test]
    fn test_key_export_import_roundtrip() {
        let aes = service_with_key();
        let exported = aes.key_bytes().unwrap();

        let mut other = AesService::new();
        other.set_key_bytes(&exported).unwrap();

        let plaintext = b"message crossing service instances";
        let ciphertext = aes.encode(plaintext).unwrap();
        assert_eq!(other.decode(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_import_wrong_length_fails() {
        let mut aes = AesService::new();
        let result = aes.set_key_bytes(&[0u8; 16]);
        assert!(matches!(
            result,
            Err(SymmetricError::InvalidKeySize {
                expected: AES_KEY_SIZE,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_password_derivation_is_deterministic() {
        let salt = [7u8; SALT_SIZE];

        let mut a = AesService::new();
        a.generate_key_from_password(&password(), &salt).unwrap();
        let mut b = AesService::new();
        b.generate_key_from_password(&password(), &salt).unwrap();

        assert_eq!(a.key_bytes().unwrap(), b.key_bytes().unwrap());
    }

    #[test]
    fn test_password_derivation_salt_sensitivity() {
        let mut a = AesService::new();
        a.generate_key_from_password(&password(), &[7u8; SALT_SIZE])
            .unwrap();
        let mut b = AesService::new();
        b.generate_key_from_password(&password(), &[8u8; SALT_SIZE])
            .unwrap();

        assert_ne!(a.key_bytes().unwrap(), b.key_bytes().unwrap());
    }

    #[test]
    fn test_password_derivation_wrong_salt_size() {
        let mut aes = AesService::new();
        let result = aes.generate_key_from_password(&password(), &[0u8; 16]);
        assert!(matches!(
            result,
            Err(SymmetricError::InvalidSaltSize {
                expected: SALT_SIZE,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_decrypt_tampered_ciphertext() {
        let aes = service_with_key();
        let mut ciphertext = aes.encode(b"secret message, do not tamper").unwrap();

        // 翻转密文部分的一个字节
        let len = ciphertext.len();
        ciphertext[len - 1] ^= 0xff;

        assert!(matches!(
            aes.decode(&ciphertext),
            Err(SymmetricError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_decrypt_tampered_nonce() {
        let aes = service_with_key();
        let mut ciphertext = aes.encode(b"some data").unwrap();
        ciphertext[0] ^= 0xff;

        assert!(matches!(
            aes.decode(&ciphertext),
            Err(SymmetricError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_decrypt_tampered_tag() {
        let aes = service_with_key();
        let mut ciphertext = aes.encode(b"some data").unwrap();
        ciphertext[NONCE_SIZE] ^= 0xff;

        assert!(matches!(
            aes.decode(&ciphertext),
            Err(SymmetricError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_decrypt_truncated_ciphertext() {
        let aes = service_with_key();
        let result = aes.decode(&[0u8; NONCE_SIZE + TAG_SIZE - 1]);
        assert!(matches!(
            result,
            Err(SymmetricError::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let aes1 = service_with_key();
        let aes2 = service_with_key();

        let ciphertext = aes1.encode(b"this is another secret").unwrap();
        assert!(matches!(
            aes2.decode(&ciphertext),
            Err(SymmetricError::DecryptionFailed)
        ));
    }
}
