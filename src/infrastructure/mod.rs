pub mod logging;
pub mod rpc_schema;
pub mod rpc_validator;
