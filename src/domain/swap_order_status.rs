//! 兑换订单状态
//!
//! 兑换服务商返回四字母状态码，这里把它们映射为统一的状态机，
//! 供订单轮询判断何时停止。轮询计时器本身不在本模块内。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 兑换订单状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapOrderStatus {
    /// 订单已创建，等待用户转入
    Open,

    /// 已收到用户转入，等待兑出
    Received,

    /// 兑出完成
    Filled,

    /// 订单已取消
    Cancelled,

    /// 超时未收到转入
    Timeout,
}

impl SwapOrderStatus {
    /// 从服务商状态码解析，未知状态码返回 `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "OPEN" => Some(Self::Open),
            "RCVE" => Some(Self::Received),
            "FILL" => Some(Self::Filled),
            "CANC" => Some(Self::Cancelled),
            "TIME" => Some(Self::Timeout),
            _ => None,
        }
    }

    /// 服务商状态码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Received => "RCVE",
            Self::Filled => "FILL",
            Self::Cancelled => "CANC",
            Self::Timeout => "TIME",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Open => "等待转入",
            Self::Received => "已收到转入",
            Self::Filled => "兑换完成",
            Self::Cancelled => "订单已取消",
            Self::Timeout => "订单已超时",
        }
    }

    /// 是否为最终状态（不可再转换）
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled | Self::Timeout)
    }

    /// 是否需要继续轮询
    pub fn should_poll(&self) -> bool {
        !self.is_final()
    }

    /// 验证状态转换合法性
    pub fn can_transition_to(&self, target: &Self) -> bool {
        use SwapOrderStatus::*;

        match (self, target) {
            // Open → Received | Cancelled | Timeout
            (Open, Received) | (Open, Cancelled) | (Open, Timeout) => true,

            // Received → Filled | Cancelled
            (Received, Filled) | (Received, Cancelled) => true,

            _ => false,
        }
    }
}

impl fmt::Display for SwapOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
