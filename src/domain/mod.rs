//! Domain 模块
//!
//! 兑换流程相关的记录形状与状态

pub mod derivation_path_validator;
pub mod raw_transaction;
pub mod swap;
pub mod swap_order_status;

// 重新导出常用类型
pub use derivation_path_validator::{is_valid_derivation_path, KNOWN_DERIVATION_PATHS};
pub use raw_transaction::{is_valid_raw_transaction, RawTransaction, RawTxViolation};
pub use swap::{SwapCurrency, SwapLimits, SwapRequest};
pub use swap_order_status::SwapOrderStatus;
