//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use label_validator::config::Config;
use label_validator::error::ValidatorError;
use label_validator::record::Side;
use std::path::Path;
use tempfile::tempdir;

/// ValidatorErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ValidatorError::Config("テスト設定エラー".to_string()),
        ValidatorError::FileNotFound("truth.txt".to_string()),
        ValidatorError::MalformedLine {
            side: Side::Truth,
            line: 1,
            content: "img1".to_string(),
        },
        ValidatorError::EmptyComparisonSet,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// FileNotFoundはパスを含む
#[test]
fn test_file_not_found_message() {
    let err = ValidatorError::FileNotFound("/data/truth.txt".to_string());
    assert!(format!("{}", err).contains("/data/truth.txt"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ValidatorError = json_err.into();

    assert!(matches!(err, ValidatorError::JsonParse(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "on_malformed": "lenient" }"#).unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ValidatorError::JsonParse(_))));
}

/// 存在しない設定ファイルを明示指定
#[test]
fn test_explicit_config_missing() {
    let result = Config::load_from(Path::new("/nonexistent/path/12345/config.json"));
    assert!(matches!(result, Err(ValidatorError::FileNotFound(_))));
}
