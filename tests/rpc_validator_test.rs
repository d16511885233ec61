//! RPC 响应校验集成测试

mod common;

use serde_json::{json, Value};
use swapguard::infrastructure::rpc_schema::{Schema, RPC_NODE_SCHEMA};
use swapguard::infrastructure::rpc_validator::{
    format_errors, is_valid_eth_call, is_valid_get_balance, is_valid_token_balance, validate,
    RpcApi,
};

fn well_formed() -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": "0x1bc16d674ec80000"})
}

#[test]
fn test_every_call_site_accepts_well_formed_response() {
    for api in RpcApi::ALL {
        let checked = api.check(well_formed()).unwrap();
        assert_eq!(checked, well_formed(), "{api} altered the response");
    }
}

#[test]
fn test_every_call_site_except_token_balance_rejects() {
    let bad = json!({"result": 42});
    for api in RpcApi::ALL {
        match api {
            RpcApi::TokenBalance => {
                assert_eq!(api.check(bad.clone()).unwrap(), json!({"result": "Failed"}))
            }
            _ => {
                let err = api.check(bad.clone()).unwrap_err();
                assert_eq!(err.to_string(), format!("Invalid {} Error", api.label()));
                assert_eq!(err.api, api.label());
            }
        }
    }
}

#[test]
fn test_error_object_message_and_data() {
    let response = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "error": {"code": -32000, "message": "insufficient funds", "data": "0xdead"}
    });
    let err = is_valid_get_balance(response.clone()).unwrap_err();
    assert_eq!(err.message, "insufficient funds 0xdead");
    assert_eq!(format_errors(&response, "Get Balance"), "insufficient funds 0xdead");
}

#[test]
fn test_error_object_without_data_keeps_trailing_space() {
    let response = json!({"error": {"message": "nonce too low"}});
    assert_eq!(format_errors(&response, "Raw Tx"), "nonce too low ");
}

#[test]
fn test_token_balance_free_function() {
    assert_eq!(is_valid_token_balance(well_formed()), well_formed());
    assert_eq!(
        is_valid_token_balance(json!({"unexpected": true})),
        json!({"result": "Failed"})
    );
}

#[test]
fn test_schema_rules() {
    // id 可以是字符串或整数
    assert!(validate(&json!({"id": "abc"}), &RPC_NODE_SCHEMA).valid);
    assert!(!validate(&json!({"id": 1.5}), &RPC_NODE_SCHEMA).valid);
    // result 可以是数组
    assert!(RPC_NODE_SCHEMA.is_valid(&json!({"result": ["0x1", "0x2"]})));
    // message 最长 2 个字符
    assert!(RPC_NODE_SCHEMA.is_valid(&json!({"message": "OK"})));
    assert!(!RPC_NODE_SCHEMA.is_valid(&json!({"message": "NOTOK"})));
    // 非对象响应
    assert!(!RPC_NODE_SCHEMA.is_valid(&json!("0x1")));
}

#[test]
fn test_custom_schema_with_eth_call() {
    let schema = Schema::from_json_str(
        r#"{"type": "object", "required": ["result"], "properties": {"result": {"type": "string"}}}"#,
    )
    .unwrap();

    let ok = is_valid_eth_call(json!({"result": "0x"}), &schema).check("Custom");
    assert!(ok.is_ok());

    let fallback =
        is_valid_eth_call(json!({}), &schema).check_or_else("Custom", |_| json!({"result": "0x0"}));
    assert_eq!(fallback, json!({"result": "0x0"}));
}

#[test]
fn test_api_names_parse_from_cli_spellings() {
    for spelling in ["get-balance", "get_balance", "GetBalance", "Get Balance"] {
        assert_eq!(spelling.parse::<RpcApi>().unwrap(), RpcApi::GetBalance);
    }
    assert!("get-gas".parse::<RpcApi>().is_err());
}

#[test]
fn test_non_object_error_uses_generic_message() {
    for error in [json!(false), json!(""), json!(0), json!("boom"), json!(null)] {
        let response = json!({ "error": error });
        assert_eq!(format_errors(&response, "Get Balance"), "Invalid Get Balance Error");
        let err = is_valid_get_balance(response).unwrap_err();
        assert_eq!(err.message, "Invalid Get Balance Error");
    }
}
