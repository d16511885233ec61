//! Hex 与私钥格式校验

use serde_json::Value;

/// 私钥的 hex 字符数（32字节）
pub const PRIVATE_KEY_HEX_LEN: usize = 64;
/// 私钥字节数
pub const PRIVATE_KEY_BYTE_LEN: usize = 32;
/// 加密私钥允许的长度（不带/带 `0x` 前缀）
pub const ENCRYPTED_PRIVATE_KEY_LENS: [usize; 2] = [128, 132];

/// 私钥输入：hex 字符串或原始字节
#[derive(Debug, Clone, Copy)]
pub enum PrivateKeyInput<'a> {
    Hex(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for PrivateKeyInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Hex(value)
    }
}

impl<'a> From<&'a String> for PrivateKeyInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Hex(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for PrivateKeyInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a [u8; 32]> for PrivateKeyInput<'a> {
    fn from(value: &'a [u8; 32]) -> Self {
        Self::Bytes(value.as_slice())
    }
}

/// 去掉可选的 `0x` 前缀
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// 验证 hex 字符串
///
/// 空字符串视为有效；`0x` 前缀可选；其余部分必须全部为 hex 字符（可为空）。
pub fn is_valid_hex(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    strip_hex_prefix(s).chars().all(|c| c.is_ascii_hexdigit())
}

/// 对动态值做 hex 校验，非字符串一律无效
pub fn is_valid_hex_value(value: &Value) -> bool {
    value.as_str().map(is_valid_hex).unwrap_or(false)
}

/// 验证私钥
///
/// - hex 输入：去前缀后必须恰好64位 hex，且解码后是合法的 secp256k1 标量
/// - 字节输入：必须恰好32字节，且是合法标量
pub fn is_valid_private_key<'a>(privkey: impl Into<PrivateKeyInput<'a>>) -> bool {
    match privkey.into() {
        PrivateKeyInput::Hex(s) => {
            let stripped = strip_hex_prefix(s);
            if stripped.len() != PRIVATE_KEY_HEX_LEN {
                return false;
            }
            match hex::decode(stripped) {
                Ok(bytes) => is_valid_secp256k1_scalar(&bytes),
                Err(_) => false,
            }
        }
        PrivateKeyInput::Bytes(bytes) => {
            bytes.len() == PRIVATE_KEY_BYTE_LEN && is_valid_secp256k1_scalar(bytes)
        }
    }
}

/// 对动态值做私钥校验：字符串按 hex 处理，其余类型无效
pub fn is_valid_private_key_value(value: &Value) -> bool {
    value
        .as_str()
        .map(|s| is_valid_private_key(s))
        .unwrap_or(false)
}

/// 验证加密私钥：长度（UTF-16 码元数）必须为128或132
pub fn is_valid_encrypted_private_key(privkey: &str) -> bool {
    ENCRYPTED_PRIVATE_KEY_LENS.contains(&privkey.encode_utf16().count())
}

/// 对动态值做加密私钥校验，非字符串一律无效
pub fn is_valid_encrypted_private_key_value(value: &Value) -> bool {
    value
        .as_str()
        .map(is_valid_encrypted_private_key)
        .unwrap_or(false)
}

/// 标量必须落在 [1, n-1] 区间内
fn is_valid_secp256k1_scalar(bytes: &[u8]) -> bool {
    bytes.len() == PRIVATE_KEY_BYTE_LEN && k256::SecretKey::from_slice(bytes).is_ok()
}
