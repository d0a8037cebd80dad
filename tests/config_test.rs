//! 設定ファイルテスト

use pda_inbound::config::Config;
use pda_inbound::error::InboundError;
use tempfile::tempdir;

/// 設定ファイルがなければ既定値
#[test]
fn test_load_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");
    assert_eq!(config, Config::default());
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        default_operator: Some("A1024".to_string()),
        valid_mids: vec!["123456789012".to_string()],
        login_delay_ms: 0,
        ..Default::default()
    };
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);
    assert!(loaded.mid_table().contains("123456789012"));
}

/// 不正なJSON
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, InboundError::JsonParse(_)));
}

/// 範囲外のスキャン一致率
#[test]
fn test_load_invalid_hit_rate() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"scan_hit_rate": 1.5}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, InboundError::Config(_)));
}

/// 壊れた設定ファイルでも初期化できる
#[test]
fn test_reset_repairs_invalid_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"scan_hit_rate": 1.5}"#).unwrap();
    assert!(Config::load_from(&path).is_err());

    let config = Config::reset_at(&path).expect("初期化失敗");
    assert_eq!(config, Config::default());

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, Config::default());
}
