//! トースト通知
//!
//! 一定時間で自動的に消える成功/エラー通知。

use serde::{Deserialize, Serialize};

/// 通知の表示時間の既定値（ms）
pub const DEFAULT_NOTICE_MS: u64 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    /// 消去時刻（epoch ms）
    pub expires_at: i64,
}

impl Notice {
    pub fn success(message: impl Into<String>, now: i64, ttl_ms: u64) -> Self {
        Self::new(message, NoticeKind::Success, now, ttl_ms)
    }

    pub fn error(message: impl Into<String>, now: i64, ttl_ms: u64) -> Self {
        Self::new(message, NoticeKind::Error, now, ttl_ms)
    }

    fn new(message: impl Into<String>, kind: NoticeKind, now: i64, ttl_ms: u64) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now.saturating_add(i64::try_from(ttl_ms).unwrap_or(i64::MAX)),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expiry() {
        let notice = Notice::success("saved", 1_000, DEFAULT_NOTICE_MS);
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(!notice.is_expired(1_000));
        assert!(!notice.is_expired(3_499));
        assert!(notice.is_expired(3_500));
    }

    #[test]
    fn test_notice_error_kind() {
        let notice = Notice::error("bad", 0, 10);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "bad");
    }

    #[test]
    fn test_huge_ttl_never_expires_early() {
        let notice = Notice::success("x", 1_000, u64::MAX);
        assert_eq!(notice.expires_at, i64::MAX);
        assert!(!notice.is_expired(1_000));
    }
}
