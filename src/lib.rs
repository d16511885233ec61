//! swapguard - 兑换流程的校验层
//!
//! 地址、私钥、原始交易与 JSON-RPC 响应的格式/语义校验，
//! 在状态流转之前（例如启用提交按钮、接受交易广播）做把关。

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

// 重新导出常用类型
pub use error::{InvalidRpcResponseError, NameNormalizeError, SchemaError, SwapValidationError};

pub mod prelude {
    pub use crate::{
        domain::{
            is_valid_derivation_path, is_valid_raw_transaction, RawTransaction, SwapCurrency,
            SwapLimits, SwapOrderStatus, SwapRequest,
        },
        error::InvalidRpcResponseError,
        infrastructure::rpc_validator::{is_valid_eth_call, RpcApi},
        utils::*,
    };
}
