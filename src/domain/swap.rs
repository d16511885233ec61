//! 兑换表单校验
//!
//! 兑换流程中"提交"按钮是否可用由这里决定：
//! 源币种与目标币种不同、兑换数量合法且在限额内、收款地址对目标币种有效。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SwapValidationError;
use crate::utils::address_validator::AddressValidator;
use crate::utils::numeric_validator::{is_valid_gas_price_value, parse_float_prefix};

/// 支持兑换的币种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwapCurrency {
    Eth,
    Btc,
    Rep,
}

impl SwapCurrency {
    pub const ALL: [SwapCurrency; 3] = [Self::Eth, Self::Btc, Self::Rep];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Btc => "BTC",
            Self::Rep => "REP",
        }
    }
}

impl fmt::Display for SwapCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for SwapCurrency {
    type Err = SwapValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ETH" => Ok(Self::Eth),
            "BTC" => Ok(Self::Btc),
            "REP" => Ok(Self::Rep),
            _ => Err(SwapValidationError::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// 验证目标币种的收款地址（主网）
///
/// BTC 走链B校验，其余币种（ETH 及 ERC-20 代币）走链A校验。
pub fn is_valid_receiving_address(destination: SwapCurrency, address: &str) -> bool {
    is_valid_receiving_address_with(&AddressValidator::default(), destination, address)
}

/// 使用指定验证器校验收款地址
pub fn is_valid_receiving_address_with(
    validator: &AddressValidator,
    destination: SwapCurrency,
    address: &str,
) -> bool {
    match destination {
        SwapCurrency::Btc => validator.is_valid_btc_address(address),
        SwapCurrency::Eth | SwapCurrency::Rep => validator.is_valid_eth_address(address),
    }
}

/// 源币种兑换数量限额（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapLimits {
    pub min: f64,
    pub max: f64,
}

impl SwapLimits {
    /// 由 BTC 计价的限额换算源币种限额
    ///
    /// `btc_per_unit` 为 1 单位源币种可兑换的 BTC 数量；源币种为 BTC 时忽略。
    pub fn for_origin(
        origin: SwapCurrency,
        btc_per_unit: f64,
        btc_min: f64,
        btc_max: f64,
    ) -> Result<Self, SwapValidationError> {
        if origin == SwapCurrency::Btc {
            return Ok(Self {
                min: btc_min,
                max: btc_max,
            });
        }
        if !btc_per_unit.is_finite() || btc_per_unit <= 0.0 {
            return Err(SwapValidationError::InvalidRate(btc_per_unit));
        }
        Ok(Self {
            min: btc_min / btc_per_unit,
            max: btc_max / btc_per_unit,
        })
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// 兑换请求（表单当前值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub origin: SwapCurrency,
    pub destination: SwapCurrency,
    pub origin_amount: String,
    pub destination_address: String,
}

impl SwapRequest {
    /// 使用主网地址规则校验
    pub fn validate(&self, limits: &SwapLimits) -> Result<(), SwapValidationError> {
        self.validate_with(limits, &AddressValidator::default())
    }

    /// 按顺序校验，返回第一个错误
    pub fn validate_with(
        &self,
        limits: &SwapLimits,
        validator: &AddressValidator,
    ) -> Result<(), SwapValidationError> {
        if self.origin == self.destination {
            return Err(SwapValidationError::SameCurrency);
        }

        let amount = Some(self.origin_amount.as_str())
            .filter(|s| is_valid_gas_price_value(s))
            .and_then(parse_float_prefix)
            .ok_or_else(|| SwapValidationError::InvalidAmount(self.origin_amount.clone()))?;

        if amount < limits.min {
            return Err(SwapValidationError::BelowMinimum {
                amount,
                min: limits.min,
            });
        }
        if amount > limits.max {
            return Err(SwapValidationError::AboveMaximum {
                amount,
                max: limits.max,
            });
        }

        if !is_valid_receiving_address_with(validator, self.destination, &self.destination_address)
        {
            return Err(SwapValidationError::InvalidReceivingAddress {
                currency: self.destination.to_string(),
            });
        }

        Ok(())
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self, limits: &SwapLimits) -> bool {
        self.validate(limits).is_ok()
    }
}
