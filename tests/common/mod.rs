//! 测试辅助模块
//! 提供测试向量和样例记录

#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// EIP-55 校验和地址
pub const CHECKSUM_ETH_ADDRESS: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
/// 全小写地址
pub const LOWER_ETH_ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0beb6";
/// 主网 P2PKH 地址
pub const BTC_P2PKH_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
/// 主网 Bech32 地址
pub const BTC_BECH32_ADDRESS: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
/// 测试网 Bech32 地址
pub const BTC_TESTNET_ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";
/// 合法私钥
pub const PRIVATE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// 最小的合法原始交易记录
pub fn raw_tx_record() -> Map<String, Value> {
    match json!({
        "nonce": "0x1",
        "gasPrice": "0x4a817c800",
        "gasLimit": "0x5208",
        "to": LOWER_ETH_ADDRESS,
        "value": "0x0",
        "data": "0x",
        "chainId": 3
    }) {
        Value::Object(map) => map,
        _ => unreachable!("object literal"),
    }
}

/// 构造 0x + 40 位重复字符的地址
pub fn repeated_address(ch: char) -> String {
    format!("0x{}", ch.to_string().repeat(40))
}
