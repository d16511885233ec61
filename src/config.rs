//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use bitcoin::Network;
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

/// 校验规则配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// 链B地址所属网络：bitcoin / testnet / signet / regtest
    pub btc_network: String,
    /// 兑换下限（BTC计价）
    pub swap_btc_min: f64,
    /// 兑换上限（BTC计价）
    pub swap_btc_max: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            btc_network: std::env::var("BTC_NETWORK").unwrap_or_else(|_| "bitcoin".into()),
            swap_btc_min: std::env::var("SWAP_BTC_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.01),
            swap_btc_max: std::env::var("SWAP_BTC_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3.0),
        }
    }
}

impl ValidationConfig {
    /// 解析链B网络
    pub fn network(&self) -> Result<Network> {
        self.btc_network
            .parse::<Network>()
            .with_context(|| format!("Unsupported BTC_NETWORK: {}", self.btc_network))
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            logging: LoggingConfig::default(),
            validation: ValidationConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        self.validation.network()?;

        let (min, max) = (self.validation.swap_btc_min, self.validation.swap_btc_max);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            anyhow::bail!(
                "SWAP_BTC_MIN/SWAP_BTC_MAX must be positive with min <= max (got {} / {})",
                min,
                max
            );
        }

        Ok(())
    }
}
