// RPC响应校验模块 - 防止不合规的节点响应进入业务逻辑

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::error::InvalidRpcResponseError;
use crate::infrastructure::rpc_schema::{Schema, ValidatorResult, RPC_NODE_SCHEMA};

/// 用 schema 校验响应，返回完整的校验结果
pub fn validate(response: &Value, schema: &Schema) -> ValidatorResult {
    schema.validate(response)
}

/// 构造错误文案
///
/// 响应带 `error` 对象时为 `"<message> <data>"`（无 data 时保留尾部空格），
/// 否则为 `"Invalid <api> Error"`。`error` 不是对象（false、0、字符串等）时按无 error 处理。
pub fn format_errors(response: &Value, api_label: &str) -> String {
    match response.get("error") {
        Some(error) if error.is_object() => {
            let message = error.get("message").map(render_field).unwrap_or_default();
            let data = error.get("data").map(render_field).unwrap_or_default();
            format!("{message} {data}")
        }
        _ => format!("Invalid {api_label} Error"),
    }
}

/// 字符串原样输出，其余值按 JSON 输出；null 视为空
fn render_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 绑定了响应与 schema 的待校验调用
#[derive(Debug, Clone)]
pub struct EthCall<'a> {
    response: Value,
    schema: &'a Schema,
}

/// 绑定响应与 schema，随后通过 [`EthCall::check`] 或 [`EthCall::check_or_else`] 给出 api 标签
pub fn is_valid_eth_call(response: Value, schema: &Schema) -> EthCall<'_> {
    EthCall { response, schema }
}

impl<'a> EthCall<'a> {
    /// 校验失败时返回 `InvalidRpcResponseError`，成功时原样返回响应
    pub fn check(self, api_label: &str) -> Result<Value, InvalidRpcResponseError> {
        if self.schema.is_valid(&self.response) {
            return Ok(self.response);
        }
        let message = format_errors(&self.response, api_label);
        tracing::warn!(api = api_label, %message, "rpc response failed schema validation");
        Err(InvalidRpcResponseError::new(api_label, message))
    }

    /// 校验失败时调用 fallback 并返回其结果，成功时原样返回响应
    pub fn check_or_else<F>(self, api_label: &str, fallback: F) -> Value
    where
        F: FnOnce(Value) -> Value,
    {
        if self.schema.is_valid(&self.response) {
            return self.response;
        }
        tracing::debug!(api = api_label, "rpc response invalid, using fallback");
        fallback(self.response)
    }
}

/// 使用 RPC 响应的各个调用点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcApi {
    GetBalance,
    EstimateGas,
    CallRequest,
    TokenBalance,
    TransactionCount,
    CurrentBlock,
    RawTx,
    SendTransaction,
    SignMessage,
    GetAccounts,
    NetVersion,
}

impl RpcApi {
    pub const ALL: [RpcApi; 11] = [
        Self::GetBalance,
        Self::EstimateGas,
        Self::CallRequest,
        Self::TokenBalance,
        Self::TransactionCount,
        Self::CurrentBlock,
        Self::RawTx,
        Self::SendTransaction,
        Self::SignMessage,
        Self::GetAccounts,
        Self::NetVersion,
    ];

    /// 错误文案中使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::GetBalance => "Get Balance",
            Self::EstimateGas => "Estimate Gas",
            Self::CallRequest => "Call Request",
            Self::TokenBalance => "Token Balance",
            Self::TransactionCount => "Transaction Count",
            Self::CurrentBlock => "Current Block",
            Self::RawTx => "Raw Tx",
            Self::SendTransaction => "Send Transaction",
            Self::SignMessage => "Sign Message",
            Self::GetAccounts => "Get Accounts",
            Self::NetVersion => "Net Version",
        }
    }

    /// 用共享的节点 schema 校验该调用点的响应
    ///
    /// Token Balance 不会失败：校验不通过时返回 `{"result": "Failed"}`。
    pub fn check(&self, response: Value) -> Result<Value, InvalidRpcResponseError> {
        let call = is_valid_eth_call(response, &RPC_NODE_SCHEMA);
        match self {
            Self::TokenBalance => Ok(call.check_or_else(self.label(), |_| token_balance_fallback())),
            _ => call.check(self.label()),
        }
    }
}

impl fmt::Display for RpcApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RpcApi {
    type Err = anyhow::Error;

    /// 接受 `get-balance` / `get_balance` / `GetBalance` / `Get Balance` 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|api| {
                api.label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(key.chars())
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown rpc api: {}", s))
    }
}

fn token_balance_fallback() -> Value {
    json!({ "result": "Failed" })
}

pub fn is_valid_get_balance(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::GetBalance.check(response)
}

pub fn is_valid_estimate_gas(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::EstimateGas.check(response)
}

pub fn is_valid_call_request(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::CallRequest.check(response)
}

/// 校验失败时返回 `{"result": "Failed"}`，从不返回错误
pub fn is_valid_token_balance(response: Value) -> Value {
    is_valid_eth_call(response, &RPC_NODE_SCHEMA)
        .check_or_else(RpcApi::TokenBalance.label(), |_| token_balance_fallback())
}

pub fn is_valid_transaction_count(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::TransactionCount.check(response)
}

pub fn is_valid_current_block(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::CurrentBlock.check(response)
}

pub fn is_valid_raw_tx_api(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::RawTx.check(response)
}

pub fn is_valid_send_transaction(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::SendTransaction.check(response)
}

pub fn is_valid_sign_message(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::SignMessage.check(response)
}

pub fn is_valid_get_accounts(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::GetAccounts.check(response)
}

pub fn is_valid_get_net_version(response: Value) -> Result<Value, InvalidRpcResponseError> {
    RpcApi::NetVersion.check(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_response_returned_unchanged() {
        let response = json!({"jsonrpc": "2.0", "id": 1, "result": "0x1bc16d674ec80000"});
        assert_eq!(is_valid_get_balance(response.clone()).unwrap(), response);
    }

    #[test]
    fn test_generic_error_message() {
        let err = is_valid_get_balance(json!({"result": 12})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Get Balance Error");
        assert_eq!(err.api, "Get Balance");
    }

    #[test]
    fn test_upstream_error_message() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "insufficient funds", "data": "0xdead"}
        });
        let err = is_valid_send_transaction(response).unwrap_err();
        assert_eq!(err.message, "insufficient funds 0xdead");

        let response = json!({"error": {"message": "execution reverted"}});
        let err = is_valid_estimate_gas(response).unwrap_err();
        assert_eq!(err.message, "execution reverted ");

        let response = json!({"error": {"message": "bad", "data": {"reason": "x"}}});
        let err = is_valid_call_request(response).unwrap_err();
        assert_eq!(err.message, r#"bad {"reason":"x"}"#);
    }

    #[test]
    fn test_token_balance_fallback() {
        assert_eq!(
            is_valid_token_balance(json!({"result": 12})),
            json!({"result": "Failed"})
        );
        assert_eq!(
            RpcApi::TokenBalance.check(json!({"result": 12})).unwrap(),
            json!({"result": "Failed"})
        );
        let ok = json!({"id": 7, "result": "0x0"});
        assert_eq!(is_valid_token_balance(ok.clone()), ok);
    }

    #[test]
    fn test_custom_fallback_receives_response() {
        let response = json!({"result": false});
        let out = is_valid_eth_call(response.clone(), &RPC_NODE_SCHEMA)
            .check_or_else("Custom", |r| json!({"echo": r}));
        assert_eq!(out, json!({"echo": response}));
    }

    #[test]
    fn test_every_call_site_uses_its_label() {
        for api in RpcApi::ALL {
            if api == RpcApi::TokenBalance {
                continue;
            }
            let err = api.check(json!({"unexpected": true})).unwrap_err();
            assert_eq!(err.message, format!("Invalid {} Error", api.label()));
        }
        assert!(is_valid_transaction_count(json!({"result": "0x5"})).is_ok());
        assert!(is_valid_current_block(json!({"result": "0x10"})).is_ok());
        assert!(is_valid_raw_tx_api(json!({"result": "0xf86c"})).is_ok());
        assert!(is_valid_sign_message(json!({"result": "0xsig"})).is_ok());
        assert!(is_valid_get_accounts(json!({"result": []})).is_ok());
        assert!(is_valid_get_net_version(json!({"result": "1"})).is_ok());
    }

    #[test]
    fn test_rpc_api_from_str() {
        assert_eq!("get-balance".parse::<RpcApi>().unwrap(), RpcApi::GetBalance);
        assert_eq!("token_balance".parse::<RpcApi>().unwrap(), RpcApi::TokenBalance);
        assert_eq!("Net Version".parse::<RpcApi>().unwrap(), RpcApi::NetVersion);
        assert_eq!("RawTx".parse::<RpcApi>().unwrap(), RpcApi::RawTx);
        assert!("get-block".parse::<RpcApi>().is_err());
    }

    #[test]
    fn test_validate_reports_errors() {
        let result = validate(&json!({"message": "toolong"}), &RPC_NODE_SCHEMA);
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "instance.message");
    }
}
