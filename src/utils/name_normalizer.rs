//! 名称服务标准化模块
//!
//! 将人类可读的名称（如 `MyWallet.eth`）标准化为规范形式，
//! 供名称服务地址校验使用。标准化失败通过 `Result` 显式返回，
//! 由调用方决定如何映射（地址校验器一律映射为 `false`）。

use crate::error::NameNormalizeError;

/// 名称标准化器
///
/// 默认实现见 [`DefaultNameNormalizer`]，调用方可以替换为完整的 UTS-46 实现。
pub trait NameNormalizer: Send + Sync {
    fn normalize(&self, name: &str) -> Result<String, NameNormalizeError>;
}

/// 默认标准化器：小写折叠 + 去除可忽略字符 + STD3 ASCII 规则
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameNormalizer;

/// 标准化时直接删除的字符（软连字符、零宽字符、变体选择符）
const IGNORED_CHARS: &[char] = &[
    '\u{00AD}', '\u{034F}', '\u{180B}', '\u{180C}', '\u{180D}', '\u{200B}', '\u{2060}',
    '\u{FEFF}',
];

/// 视为标签分隔符的全角/表意句点
const DOT_EQUIVALENTS: &[char] = &['\u{3002}', '\u{FF0E}', '\u{FF61}'];

impl NameNormalizer for DefaultNameNormalizer {
    fn normalize(&self, name: &str) -> Result<String, NameNormalizeError> {
        let mut mapped = String::with_capacity(name.len());

        for (position, ch) in name.chars().enumerate() {
            if IGNORED_CHARS.contains(&ch) || ('\u{FE00}'..='\u{FE0F}').contains(&ch) {
                continue;
            }
            if DOT_EQUIVALENTS.contains(&ch) {
                mapped.push('.');
                continue;
            }
            if ch.is_ascii() {
                // STD3：ASCII 范围只允许字母、数字、连字符和点
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
                    mapped.push(ch.to_ascii_lowercase());
                    continue;
                }
                return Err(NameNormalizeError::DisallowedCharacter { ch, position });
            }
            if ch.is_alphanumeric() {
                mapped.extend(ch.to_lowercase());
                continue;
            }
            return Err(NameNormalizeError::DisallowedCharacter { ch, position });
        }

        if mapped.is_empty() {
            return Ok(mapped);
        }

        for label in mapped.split('.') {
            if label.is_empty() {
                return Err(NameNormalizeError::EmptyLabel);
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(NameNormalizeError::InvalidHyphen {
                    label: label.to_string(),
                });
            }
        }

        Ok(mapped)
    }
}

/// 取标准化名称最后一个 `.` 之后的后缀；没有 `.` 时返回整个名称
pub fn name_suffix(normalized: &str) -> &str {
    match normalized.rfind('.') {
        Some(idx) => &normalized[idx + 1..],
        None => normalized,
    }
}
