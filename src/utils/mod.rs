pub mod address_validator;
pub mod key_validator;
pub mod name_normalizer;
pub mod numeric_validator;

// Re-export commonly used functions
pub use address_validator::{
    is_valid_btc_address, is_valid_ens_address, is_valid_ens_name, is_valid_ens_or_eth_address,
    is_valid_eth_address, AddressValidator,
};
pub use key_validator::{is_valid_encrypted_private_key, is_valid_hex, is_valid_private_key};
pub use numeric_validator::{
    is_positive_integer_or_zero, is_valid_abi_json, is_valid_byte_code, is_valid_gas_price_value,
    is_valid_numeric_value,
};
