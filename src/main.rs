//! swapguard 命令行入口
//! 对单个输入执行一次校验，stdout 输出 JSON 结论，退出码 0=有效 1=无效

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use swapguard::{
    config::Config,
    domain::{
        derivation_path_validator::{find_known_path, is_valid_derivation_path},
        raw_transaction::check_raw_transaction_value,
        swap::{is_valid_receiving_address_with, SwapCurrency, SwapLimits, SwapRequest},
        swap_order_status::SwapOrderStatus,
    },
    infrastructure::{logging, rpc_validator::RpcApi},
    utils::{
        address_validator::AddressValidator,
        key_validator::{is_valid_encrypted_private_key, is_valid_hex, is_valid_private_key},
        numeric_validator::{
            is_positive_integer_or_zero, is_valid_abi_json, is_valid_byte_code,
            is_valid_gas_price_value, is_valid_numeric_value,
        },
    },
};

#[derive(Debug, Parser)]
#[command(name = "swapguard", version, about = "Swap flow input validators")]
struct Cli {
    /// 配置文件路径（TOML），未指定时读取 CONFIG_PATH
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AddressKind {
    Eth,
    Btc,
    Ens,
    EnsName,
    EnsOrEth,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 地址校验
    Address {
        address: String,
        #[arg(long, value_enum, default_value_t = AddressKind::Eth)]
        kind: AddressKind,
    },
    /// 目标币种收款地址校验
    Receiving {
        currency: SwapCurrency,
        address: String,
    },
    /// hex 字符串校验
    Hex { value: String },
    /// 私钥校验
    PrivateKey { key: String },
    /// 加密私钥长度校验
    EncryptedKey { key: String },
    /// 原始交易记录校验（JSON 文本，`@path` 表示从文件读取）
    RawTx { input: String },
    /// 数值校验
    Numeric {
        value: String,
        /// 使用 gas 价格规则（必须 > 0）
        #[arg(long)]
        gas_price: bool,
    },
    /// 字节码校验
    Bytecode { value: String },
    /// ABI JSON 形状校验
    Abi { value: String },
    /// 非负整数校验
    Integer {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// 派生路径校验
    Path { path: String },
    /// RPC 响应校验（JSON 文本，`@path` 表示从文件读取）
    Rpc { api: RpcApi, input: String },
    /// 兑换表单校验
    Swap {
        origin: SwapCurrency,
        destination: SwapCurrency,
        amount: String,
        address: String,
        /// 1 单位源币种可兑换的 BTC 数量
        #[arg(long, default_value_t = 1.0)]
        btc_rate: f64,
    },
    /// 订单状态码解析
    OrderStatus { code: String },
}

#[derive(Debug, Serialize)]
struct Verdict {
    valid: bool,
    #[serde(skip_serializing_if = "Value::is_null")]
    detail: Value,
}

impl Verdict {
    fn new(valid: bool) -> Self {
        Self {
            valid,
            detail: Value::Null,
        }
    }

    fn with_detail(valid: bool, detail: Value) -> Self {
        Self { valid, detail }
    }
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_PATH").ok().map(PathBuf::from));
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate()?;

    logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let validator = AddressValidator::for_network(config.validation.network()?);
    tracing::debug!(network = %validator.btc_network(), "configuration loaded");

    let verdict = run(cli.command, &config, &validator)?;
    println!("{}", serde_json::to_string(&verdict)?);

    Ok(if verdict.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run(command: Command, config: &Config, validator: &AddressValidator) -> Result<Verdict> {
    let verdict = match command {
        Command::Address { address, kind } => Verdict::new(match kind {
            AddressKind::Eth => validator.is_valid_eth_address(&address),
            AddressKind::Btc => validator.is_valid_btc_address(&address),
            AddressKind::Ens => validator.is_valid_ens_address(&address),
            AddressKind::EnsName => validator.is_valid_ens_name(&address),
            AddressKind::EnsOrEth => validator.is_valid_ens_or_eth_address(&address),
        }),
        Command::Receiving { currency, address } => {
            Verdict::new(is_valid_receiving_address_with(validator, currency, &address))
        }
        Command::Hex { value } => Verdict::new(is_valid_hex(&value)),
        Command::PrivateKey { key } => Verdict::new(is_valid_private_key(key.as_str())),
        Command::EncryptedKey { key } => Verdict::new(is_valid_encrypted_private_key(&key)),
        Command::RawTx { input } => {
            let record = read_json(&input)?;
            match check_raw_transaction_value(&record) {
                Ok(()) => Verdict::new(true),
                Err(violation) => {
                    Verdict::with_detail(false, json!({ "violation": format!("{violation:?}") }))
                }
            }
        }
        Command::Numeric { value, gas_price } => Verdict::new(if gas_price {
            is_valid_gas_price_value(&value)
        } else {
            is_valid_numeric_value(&value)
        }),
        Command::Bytecode { value } => Verdict::new(is_valid_byte_code(&value)),
        Command::Abi { value } => Verdict::new(is_valid_abi_json(&value)),
        Command::Integer { value } => Verdict::new(is_positive_integer_or_zero(value)),
        Command::Path { path } => {
            let known = find_known_path(&path).map(|k| k.label);
            Verdict::with_detail(
                is_valid_derivation_path(&path),
                known.map(|label| json!({ "known": label })).unwrap_or(Value::Null),
            )
        }
        Command::Rpc { api, input } => {
            let response = read_json(&input)?;
            match api.check(response) {
                Ok(value) => Verdict::with_detail(true, json!({ "response": value })),
                Err(e) => Verdict::with_detail(false, json!({ "error": e.message })),
            }
        }
        Command::Swap {
            origin,
            destination,
            amount,
            address,
            btc_rate,
        } => {
            let limits = SwapLimits::for_origin(
                origin,
                btc_rate,
                config.validation.swap_btc_min,
                config.validation.swap_btc_max,
            )?;
            let request = SwapRequest {
                origin,
                destination,
                origin_amount: amount,
                destination_address: address,
            };
            match request.validate_with(&limits, validator) {
                Ok(()) => Verdict::with_detail(true, json!({ "limits": limits })),
                Err(e) => Verdict::with_detail(false, json!({ "error": e.to_string() })),
            }
        }
        Command::OrderStatus { code } => match SwapOrderStatus::from_code(&code) {
            Some(status) => Verdict::with_detail(
                true,
                json!({
                    "status": status,
                    "final": status.is_final(),
                    "description": status.description(),
                }),
            ),
            None => Verdict::new(false),
        },
    };

    Ok(verdict)
}

/// 解析 JSON 参数，`@path` 表示从文件读取
fn read_json(input: &str) -> Result<Value> {
    let text = match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path))?,
        None => input.to_string(),
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}
