//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("MIDが見つかりません: {0}")]
    UnknownMid(String),

    #[error("レコードが見つかりません: {0}")]
    RecordNotFound(String),

    #[error("必須項目が未入力: {0}")]
    IncompleteRecord(&'static str),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_mid() {
        let error = Error::UnknownMid("999999999999".to_string());
        let display = format!("{}", error);
        assert!(display.contains("MID"));
        assert!(display.contains("999999999999"));
    }

    #[test]
    fn test_error_display_incomplete() {
        let error = Error::IncompleteRecord("weight");
        assert_eq!(format!("{}", error), "必須項目が未入力: weight");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::RecordNotFound("1700000000000".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("RecordNotFound"));
        assert!(debug.contains("1700000000000"));
    }
}
