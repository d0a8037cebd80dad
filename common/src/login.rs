//! ログイン画面の状態
//!
//! 工号を入力して送信すると、短い待ち時間の後にダッシュボードへ遷移する。
//! パスワードは照合しない。

/// ログイン待ち時間の既定値（ms）
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub employee_id: String,
    pub password: String,
    /// 送信済みの場合、ログイン完了時刻
    pending_until: Option<i64>,
}

impl LoginState {
    pub fn new(prefill: Option<&str>) -> Self {
        Self {
            employee_id: prefill.unwrap_or_default().to_string(),
            ..Default::default()
        }
    }

    /// 送信。工号が空なら何もしない。二重送信も無視
    pub fn submit(&mut self, now: i64, delay_ms: u64) -> bool {
        if self.employee_id.is_empty() || self.is_loading() {
            return false;
        }
        let delay = i64::try_from(delay_ms).unwrap_or(i64::MAX);
        self.pending_until = Some(now.saturating_add(delay));
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending_until.is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.pending_until
    }

    /// 待ち時間が経過していれば担当者IDを入力のまま返す
    pub fn poll(&self, now: i64) -> Option<String> {
        match self.pending_until {
            Some(deadline) if now >= deadline => Some(self.employee_id.clone()),
            _ => None,
        }
    }
}
