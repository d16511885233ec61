//! 数值、字节码与 ABI 字符串校验

use once_cell::sync::Lazy;
use regex::Regex;

/// 数值字符串的可解析前缀（与浏览器端 `parseFloat` 行为一致：忽略前导空白和尾部垃圾字符）
static FLOAT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?))")
        .expect("float prefix regex")
});

/// 超过该值的整数在字符串化时会变成指数形式，无法整数往返
const MAX_SAFE_STRINGIFIED_INTEGER: f64 = 1e21;

/// 解析字符串的数值前缀，没有可解析前缀时返回 `None`
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let caps = FLOAT_PREFIX_RE.captures(s)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// 非负数值：非空、可解析为有限数、且 >= 0
pub fn is_valid_numeric_value(s: &str) -> bool {
    !s.is_empty()
        && parse_float_prefix(s)
            .map(|v| v.is_finite() && v >= 0.0)
            .unwrap_or(false)
}

/// Gas 价格：非空、可解析为有限数、且 > 0
pub fn is_valid_gas_price_value(s: &str) -> bool {
    !s.is_empty()
        && parse_float_prefix(s)
            .map(|v| v.is_finite() && v > 0.0)
            .unwrap_or(false)
}

/// 字节码：非空且长度为偶数（hex 成对编码由上游保证）
pub fn is_valid_byte_code(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0
}

/// ABI JSON：只做浅层形状检查，以 `[` 开头、以 `]` 结尾
pub fn is_valid_abi_json(s: &str) -> bool {
    s.starts_with('[') && s.ends_with(']')
}

/// 非负整数（含0）：NaN/无穷无效，必须无小数部分
pub fn is_positive_integer_or_zero(n: f64) -> bool {
    n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n < MAX_SAFE_STRINGIFIED_INTEGER
}
