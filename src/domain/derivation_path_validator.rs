//! 派生路径验证器
//!
//! 只做粗粒度检查：按 `'/` 切分后必须得到3段或4段。
//! 4段覆盖标准的 `m/44'/coin'/account'/change` 路径，3段覆盖硬件钱包的
//! `m/44'/coin'/account'` 变体。完整的 BIP44 语法不在这里校验。

use serde::Serialize;

/// 路径切分分隔符
const HARDENED_DELIMITER: &str = "'/";

/// 已知的钱包派生路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownDerivationPath {
    pub label: &'static str,
    pub path: &'static str,
}

/// 常见钱包/硬件设备使用的派生路径
pub const KNOWN_DERIVATION_PATHS: &[KnownDerivationPath] = &[
    KnownDerivationPath {
        label: "Default (ETH)",
        path: "m/44'/60'/0'/0",
    },
    KnownDerivationPath {
        label: "Ledger (ETH)",
        path: "m/44'/60'/0'",
    },
    KnownDerivationPath {
        label: "Ledger (ETC)",
        path: "m/44'/60'/160720'/0'",
    },
    KnownDerivationPath {
        label: "TREZOR (ETC)",
        path: "m/44'/61'/0'/0",
    },
    KnownDerivationPath {
        label: "Testnet",
        path: "m/44'/1'/0'/0",
    },
    KnownDerivationPath {
        label: "Expanse",
        path: "m/44'/40'/0'/0",
    },
    KnownDerivationPath {
        label: "Ubiq",
        path: "m/44'/108'/0'/0",
    },
    KnownDerivationPath {
        label: "RSK",
        path: "m/44'/137'/0'/0",
    },
    KnownDerivationPath {
        label: "POA",
        path: "m/44'/178'/0'/0",
    },
    KnownDerivationPath {
        label: "Callisto",
        path: "m/44'/820'/0'/0",
    },
    KnownDerivationPath {
        label: "TomoChain",
        path: "m/44'/889'/0'/0",
    },
    KnownDerivationPath {
        label: "EtherGem",
        path: "m/44'/1987'/0'/0",
    },
];

/// 验证派生路径：按 `'/` 切分后段数为3或4
pub fn is_valid_derivation_path(path: &str) -> bool {
    matches!(path.split(HARDENED_DELIMITER).count(), 3 | 4)
}

/// 按路径查找已知条目
pub fn find_known_path(path: &str) -> Option<&'static KnownDerivationPath> {
    KNOWN_DERIVATION_PATHS.iter().find(|known| known.path == path)
}
