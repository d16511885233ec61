//! 原始交易记录形状校验
//!
//! 签名/广播前的交易记录必须恰好包含7个字段：
//! `nonce` `gasPrice` `gasLimit` `to` `value` `data` `chainId`。
//! 字段按固定顺序逐个校验，最后检查字段总数以拒绝未知字段。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::key_validator::is_valid_hex;

/// 字段的期望基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 带 `0x` 前缀的 hex 字符串
    HexString,
    Number,
}

/// 字段要求描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirement {
    pub name: &'static str,
    pub kind: FieldKind,
    /// 是否禁止空字符串
    pub length_required: bool,
}

impl FieldRequirement {
    const fn hex(name: &'static str, length_required: bool) -> Self {
        Self {
            name,
            kind: FieldKind::HexString,
            length_required,
        }
    }

    const fn number(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            length_required: false,
        }
    }

    /// 校验单个字段值
    pub fn check(&self, value: &Value) -> Result<(), RawTxViolation> {
        match self.kind {
            FieldKind::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(RawTxViolation::WrongType(self.name))
                }
            }
            FieldKind::HexString => {
                let s = value.as_str().ok_or(RawTxViolation::WrongType(self.name))?;
                if self.length_required && s.is_empty() {
                    return Err(RawTxViolation::Empty(self.name));
                }
                if !s.is_empty() && !s.starts_with("0x") {
                    return Err(RawTxViolation::MissingPrefix(self.name));
                }
                if !is_valid_hex(s) {
                    return Err(RawTxViolation::InvalidHex(self.name));
                }
                Ok(())
            }
        }
    }
}

/// 原始交易字段要求（顺序即校验顺序）
pub const RAW_TX_FIELDS: [FieldRequirement; 7] = [
    FieldRequirement::hex("nonce", true),
    FieldRequirement::hex("gasPrice", true),
    FieldRequirement::hex("gasLimit", true),
    FieldRequirement::hex("to", true),
    FieldRequirement::hex("value", true),
    FieldRequirement::hex("data", false),
    FieldRequirement::number("chainId"),
];

/// 第一个不满足的约束
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTxViolation {
    NotAnObject,
    Missing(&'static str),
    WrongType(&'static str),
    Empty(&'static str),
    MissingPrefix(&'static str),
    InvalidHex(&'static str),
    FieldCount(usize),
}

/// 返回第一个违反的约束；全部满足时返回 `Ok(())`
pub fn check_raw_transaction(record: &Map<String, Value>) -> Result<(), RawTxViolation> {
    for requirement in RAW_TX_FIELDS.iter() {
        let value = record
            .get(requirement.name)
            .ok_or(RawTxViolation::Missing(requirement.name))?;
        requirement.check(value)?;
    }

    if record.len() != RAW_TX_FIELDS.len() {
        return Err(RawTxViolation::FieldCount(record.len()));
    }

    Ok(())
}

/// 原始交易记录是否有效
pub fn is_valid_raw_transaction(record: &Map<String, Value>) -> bool {
    match check_raw_transaction(record) {
        Ok(()) => true,
        Err(violation) => {
            tracing::trace!(?violation, "raw transaction rejected");
            false
        }
    }
}

/// 对动态值校验：非对象一律无效
pub fn check_raw_transaction_value(value: &Value) -> Result<(), RawTxViolation> {
    let record = value.as_object().ok_or(RawTxViolation::NotAnObject)?;
    check_raw_transaction(record)
}

pub fn is_valid_raw_transaction_value(value: &Value) -> bool {
    check_raw_transaction_value(value).is_ok()
}

/// 强类型的原始交易记录
///
/// 通过校验的记录可以无损转换为该结构体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawTransaction {
    pub nonce: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub to: String,
    pub value: String,
    pub data: String,
    pub chain_id: u64,
}

impl RawTransaction {
    /// 先做形状校验，再反序列化
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, RawTxViolation> {
        check_raw_transaction(record)?;
        serde_json::from_value(Value::Object(record.clone()))
            .map_err(|_| RawTxViolation::WrongType("chainId"))
    }

    /// 转换为动态记录
    pub fn to_record(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_raw_transaction(&self.to_record())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_record() -> Map<String, Value> {
        match json!({
            "nonce": "0x0",
            "gasPrice": "0x4a817c800",
            "gasLimit": "0x5208",
            "to": "0x742d35cc6634c0532925a3b844bc9e7595f0beb6",
            "value": "0xde0b6b3a7640000",
            "data": "",
            "chainId": 1
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(is_valid_raw_transaction(&valid_record()));

        let mut with_data = valid_record();
        with_data.insert("data".into(), json!("0xa9059cbb"));
        assert!(is_valid_raw_transaction(&with_data));

        let mut bare_prefix = valid_record();
        bare_prefix.insert("data".into(), json!("0x"));
        assert!(is_valid_raw_transaction(&bare_prefix));
    }

    #[test]
    fn test_missing_each_field() {
        for requirement in RAW_TX_FIELDS.iter() {
            let mut record = valid_record();
            record.remove(requirement.name);
            assert_eq!(
                check_raw_transaction(&record),
                Err(RawTxViolation::Missing(requirement.name))
            );
        }
    }

    #[test]
    fn test_extra_field() {
        let mut record = valid_record();
        record.insert("from".into(), json!("0x742d35cc6634c0532925a3b844bc9e7595f0beb6"));
        assert_eq!(
            check_raw_transaction(&record),
            Err(RawTxViolation::FieldCount(8))
        );
    }

    #[test]
    fn test_field_violations() {
        let mut record = valid_record();
        record.insert("nonce".into(), json!(""));
        assert_eq!(check_raw_transaction(&record), Err(RawTxViolation::Empty("nonce")));

        let mut record = valid_record();
        record.insert("gasPrice".into(), json!("4a817c800"));
        assert_eq!(
            check_raw_transaction(&record),
            Err(RawTxViolation::MissingPrefix("gasPrice"))
        );

        let mut record = valid_record();
        record.insert("to".into(), json!("0xzz"));
        assert_eq!(check_raw_transaction(&record), Err(RawTxViolation::InvalidHex("to")));

        let mut record = valid_record();
        record.insert("value".into(), json!(1));
        assert_eq!(check_raw_transaction(&record), Err(RawTxViolation::WrongType("value")));

        let mut record = valid_record();
        record.insert("chainId".into(), json!("1"));
        assert_eq!(check_raw_transaction(&record), Err(RawTxViolation::WrongType("chainId")));

        let mut record = valid_record();
        record.insert("data".into(), json!(null));
        assert_eq!(check_raw_transaction(&record), Err(RawTxViolation::WrongType("data")));
    }

    #[test]
    fn test_non_object_value() {
        assert_eq!(
            check_raw_transaction_value(&json!([])),
            Err(RawTxViolation::NotAnObject)
        );
        assert!(!is_valid_raw_transaction_value(&json!("0x")));
        assert!(is_valid_raw_transaction_value(&Value::Object(valid_record())));
    }

    #[test]
    fn test_typed_round_trip() {
        let tx = RawTransaction::from_record(&valid_record()).unwrap();
        assert_eq!(tx.chain_id, 1);
        assert_eq!(tx.gas_limit, "0x5208");
        assert!(tx.is_valid());
        assert_eq!(tx.to_record(), valid_record());
    }
}
