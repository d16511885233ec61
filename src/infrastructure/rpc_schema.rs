//! RPC 响应 schema 校验引擎
//!
//! 支持 JSON Schema 的一个子集：`type` `properties` `required`
//! `additionalProperties` `oneOf` `maxLength` `minLength` `items`。
//! schema 在进程启动时编译一次，之后只读共享。

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// 节点 RPC 响应 schema 文档
pub const RPC_NODE_SCHEMA_JSON: &str = r#"{
    "type": "object",
    "additionalProperties": false,
    "properties": {
        "jsonrpc": { "type": "string" },
        "id": { "oneOf": [{ "type": "string" }, { "type": "integer" }] },
        "result": { "oneOf": [{ "type": "string" }, { "type": "array" }] },
        "status": { "type": "string" },
        "message": { "type": "string", "maxLength": 2 }
    }
}"#;

/// 进程级共享的节点 RPC 响应 schema
pub static RPC_NODE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::from_json_str(RPC_NODE_SCHEMA_JSON).expect("built-in rpc node schema must compile")
});

/// schema 支持的基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::String => value.is_string(),
            Self::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
                }
                _ => false,
            },
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
        }
    }
}

impl TryFrom<String> for SchemaType {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            _ => Err(SchemaError::UnsupportedType(value)),
        }
    }
}

impl From<SchemaType> for String {
    fn from(value: SchemaType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 编译后的 schema 节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

/// 单条校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// 出错位置，形如 `instance.id`
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// 校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorResult {
    pub valid: bool,
    pub errors: Vec<SchemaViolation>,
}

impl Schema {
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(s)?)
    }

    /// 校验实例，收集全部错误
    pub fn validate(&self, instance: &Value) -> ValidatorResult {
        let mut errors = Vec::new();
        self.validate_at(instance, "instance", &mut errors);
        ValidatorResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        let mut errors = Vec::new();
        self.validate_at(instance, "instance", &mut errors);
        errors.is_empty()
    }

    fn validate_at(&self, value: &Value, path: &str, errors: &mut Vec<SchemaViolation>) {
        let violation = |message: String| SchemaViolation {
            path: path.to_string(),
            message,
        };

        if let Some(expected) = self.schema_type {
            if !expected.matches(value) {
                errors.push(violation(format!("is not of a type(s) {expected}")));
                return;
            }
        }

        if let Value::String(s) = value {
            let len = s.chars().count();
            if let Some(max) = self.max_length {
                if len > max {
                    errors.push(violation(format!(
                        "does not meet maximum length of {max}"
                    )));
                }
            }
            if let Some(min) = self.min_length {
                if len < min {
                    errors.push(violation(format!(
                        "does not meet minimum length of {min}"
                    )));
                }
            }
        }

        if let Value::Object(map) = value {
            for name in &self.required {
                if !map.contains_key(name) {
                    errors.push(violation(format!("requires property \"{name}\"")));
                }
            }
            for (name, field) in map {
                match self.properties.get(name) {
                    Some(sub) => sub.validate_at(field, &format!("{path}.{name}"), errors),
                    None if self.additional_properties == Some(false) => errors.push(violation(
                        format!("is not allowed to have the additional property \"{name}\""),
                    )),
                    None => {}
                }
            }
        }

        if let (Value::Array(elements), Some(items)) = (value, &self.items) {
            for (idx, element) in elements.iter().enumerate() {
                items.validate_at(element, &format!("{path}[{idx}]"), errors);
            }
        }

        if let Some(branches) = &self.one_of {
            let matched = branches.iter().filter(|b| b.is_valid(value)).count();
            if matched != 1 {
                errors.push(violation(format!(
                    "is not exactly one from {} subschemas (matched {matched})",
                    branches.len()
                )));
            }
        }
    }
}
