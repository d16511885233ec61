//! 统一错误类型
//!
//! 格式校验一律返回 `bool`，只有以下场景才会产生错误值：
//! - RPC 响应未通过 schema 校验且调用方未提供 fallback
//! - 名称标准化失败（由地址校验器内部吞掉并映射为 `false`）
//! - schema 文档本身无法编译
//! - 兑换表单校验

use thiserror::Error;

/// RPC 响应校验失败
///
/// `message` 即对外展示的文案：响应带有 `error` 对象时为
/// `"<error.message> <error.data>"`，否则为 `"Invalid <api> Error"`。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidRpcResponseError {
    /// 调用点标签，例如 "Get Balance"
    pub api: String,
    pub message: String,
}

impl InvalidRpcResponseError {
    pub fn new(api: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            message: message.into(),
        }
    }
}

/// 名称服务标准化错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameNormalizeError {
    #[error("empty label in name")]
    EmptyLabel,

    #[error("disallowed character {ch:?} at position {position}")]
    DisallowedCharacter { ch: char, position: usize },

    #[error("label {label:?} must not start or end with a hyphen")]
    InvalidHyphen { label: String },
}

/// schema 文档编译错误
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported schema type: {0}")]
    UnsupportedType(String),
}

/// 兑换表单校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwapValidationError {
    #[error("origin and destination currency must differ")]
    SameCurrency,

    #[error("invalid origin amount: {0:?}")]
    InvalidAmount(String),

    #[error("amount {amount} is below the minimum of {min}")]
    BelowMinimum { amount: f64, min: f64 },

    #[error("amount {amount} is above the maximum of {max}")]
    AboveMaximum { amount: f64, max: f64 },

    #[error("invalid {currency} receiving address")]
    InvalidReceivingAddress { currency: String },

    #[error("invalid BTC rate: {0}")]
    InvalidRate(f64),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_display_is_message() {
        let err = InvalidRpcResponseError::new("Get Balance", "Invalid Get Balance Error");
        assert_eq!(err.to_string(), "Invalid Get Balance Error");
        assert_eq!(err.api, "Get Balance");
    }

    #[test]
    fn test_swap_error_display() {
        let err = SwapValidationError::InvalidReceivingAddress {
            currency: "BTC".into(),
        };
        assert_eq!(err.to_string(), "invalid BTC receiving address");
    }
}
