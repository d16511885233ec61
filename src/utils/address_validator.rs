//! 地址验证模块
//!
//! 统一的地址校验入口：
//! - 链A：20字节 hex 地址（EIP-55 大小写校验和）
//! - 链B：Bitcoin 地址（Base58Check / Bech32，含版本与校验和）
//! - 名称服务：以 `.eth` / `.test` / `.reverse` 结尾的可读名称
//!
//! 所有函数都是全函数：任何格式问题都返回 `false`，不会 panic 或返回错误。

use std::sync::Arc;

use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::Network;
use once_cell::sync::Lazy;
use regex::Regex;
use sha3::{Digest, Keccak256};

use crate::utils::name_normalizer::{name_suffix, DefaultNameNormalizer, NameNormalizer};

/// 全零占位地址，永远视为无效
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// 名称服务允许的后缀
pub const NAME_SERVICE_SUFFIXES: &[&str] = &["eth", "test", "reverse"];

static HEX_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(0x)?[0-9a-f]{40}$").expect("hex address regex"));
static LOWER_HEX_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0x)?[0-9a-f]{40}$").expect("lowercase address regex"));
static UPPER_HEX_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0x)?[0-9A-F]{40}$").expect("uppercase address regex"));

static DEFAULT_VALIDATOR: Lazy<AddressValidator> = Lazy::new(AddressValidator::default);

/// 地址验证器
///
/// 持有链B网络与名称标准化器，两者在构造后不可变，可在线程间共享。
#[derive(Clone)]
pub struct AddressValidator {
    btc_network: Network,
    normalizer: Arc<dyn NameNormalizer>,
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new(Network::Bitcoin, Arc::new(DefaultNameNormalizer))
    }
}

impl std::fmt::Debug for AddressValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressValidator")
            .field("btc_network", &self.btc_network)
            .finish_non_exhaustive()
    }
}

impl AddressValidator {
    pub fn new(btc_network: Network, normalizer: Arc<dyn NameNormalizer>) -> Self {
        Self {
            btc_network,
            normalizer,
        }
    }

    /// 使用指定链B网络、默认标准化器
    pub fn for_network(btc_network: Network) -> Self {
        Self::new(btc_network, Arc::new(DefaultNameNormalizer))
    }

    pub fn btc_network(&self) -> Network {
        self.btc_network
    }

    /// 验证链A地址
    pub fn is_valid_eth_address(&self, address: &str) -> bool {
        is_valid_eth_address(address)
    }

    /// 验证链B地址（使用验证器配置的网络）
    pub fn is_valid_btc_address(&self, address: &str) -> bool {
        is_valid_btc_address_on(address, self.btc_network)
    }

    /// 链A地址或名称服务地址
    pub fn is_valid_ens_or_eth_address(&self, address: &str) -> bool {
        is_valid_eth_address(address) || self.is_valid_ens_address(address)
    }

    /// 验证名称服务标签
    ///
    /// 长度（UTF-16 码元数）大于6、标准化后非空、且不以 `0x` 开头；标准化失败视为无效。
    pub fn is_valid_ens_name(&self, name: &str) -> bool {
        if name.encode_utf16().count() <= 6 || name.starts_with("0x") {
            return false;
        }
        match self.normalizer.normalize(name) {
            Ok(normalized) => !normalized.is_empty(),
            Err(e) => {
                tracing::debug!(error = %e, "name normalization failed");
                false
            }
        }
    }

    /// 验证名称服务地址：标准化后的后缀必须在允许列表内
    pub fn is_valid_ens_address(&self, address: &str) -> bool {
        match self.normalizer.normalize(address) {
            Ok(normalized) => NAME_SERVICE_SUFFIXES.contains(&name_suffix(&normalized)),
            Err(e) => {
                tracing::debug!(error = %e, "name normalization failed");
                false
            }
        }
    }
}

/// 验证链A地址
///
/// 1. 空字符串与全零地址无效
/// 2. 必须以 `0x` 开头，且为40位 hex（大小写不敏感）
/// 3. 全小写或全大写直接通过
/// 4. 大小写混合时必须与 EIP-55 校验和完全一致
pub fn is_valid_eth_address(address: &str) -> bool {
    if address.is_empty() || address == ZERO_ADDRESS {
        return false;
    }
    if !address.starts_with("0x") {
        return false;
    }
    if !HEX_ADDRESS_RE.is_match(address) {
        return false;
    }
    if LOWER_HEX_ADDRESS_RE.is_match(address) || UPPER_HEX_ADDRESS_RE.is_match(address) {
        return true;
    }
    is_checksum_address(address)
}

/// 地址是否与其 EIP-55 校验和形式完全一致
pub fn is_checksum_address(address: &str) -> bool {
    address == to_checksum_address(address)
}

/// 计算 EIP-55 校验和地址
/// https://eips.ethereum.org/EIPS/eip-55
///
/// 输入可带或不带 `0x` 前缀，输出总是带 `0x` 前缀。
pub fn to_checksum_address(address: &str) -> String {
    let addr_lower = address
        .strip_prefix("0x")
        .unwrap_or(address)
        .to_lowercase();

    let mut hasher = Keccak256::new();
    hasher.update(addr_lower.as_bytes());
    let hash = hasher.finalize();

    let mut checksummed = String::with_capacity(addr_lower.len() + 2);
    checksummed.push_str("0x");
    for (i, ch) in addr_lower.chars().enumerate() {
        let hash_nibble = match hash.get(i / 2) {
            Some(byte) if i % 2 == 0 => byte >> 4,
            Some(byte) => byte & 0x0f,
            None => 0,
        };
        if hash_nibble >= 8 {
            checksummed.extend(ch.to_uppercase());
        } else {
            checksummed.push(ch);
        }
    }
    checksummed
}

/// 验证链B（Bitcoin 主网）地址
pub fn is_valid_btc_address(address: &str) -> bool {
    is_valid_btc_address_on(address, Network::Bitcoin)
}

/// 验证指定网络的链B地址（Base58Check 校验和 / Bech32 校验和 + 版本）
pub fn is_valid_btc_address_on(address: &str, network: Network) -> bool {
    if address.is_empty() {
        return false;
    }
    match address.parse::<Address<NetworkUnchecked>>() {
        Ok(parsed) => parsed.is_valid_for_network(network),
        Err(_) => false,
    }
}

/// 链A地址或名称服务地址
pub fn is_valid_ens_or_eth_address(address: &str) -> bool {
    DEFAULT_VALIDATOR.is_valid_ens_or_eth_address(address)
}

/// 验证名称服务标签（默认标准化器）
pub fn is_valid_ens_name(name: &str) -> bool {
    DEFAULT_VALIDATOR.is_valid_ens_name(name)
}

/// 验证名称服务地址（默认标准化器）
pub fn is_valid_ens_address(address: &str) -> bool {
    DEFAULT_VALIDATOR.is_valid_ens_address(address)
}
