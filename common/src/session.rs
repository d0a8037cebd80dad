//! セッション（端末アプリ全体の状態）
//!
//! 画面状態・担当者・レコードストア・通知を1つの値で所有する。
//! 入力はすべて [`Event`] として [`Session::handle`] に渡し、
//! 現在の画面に応じた1つのハンドラだけが処理する。

use std::fmt;

use crate::dashboard::{DashboardState, ScanOutcome};
use crate::detail::DetailEdit;
use crate::error::Error;
use crate::flow::{CaptureFlow, FlowProgress, FlowStep};
use crate::login::{LoginState, DEFAULT_LOGIN_DELAY_MS};
use crate::mids::MidTable;
use crate::notice::{Notice, DEFAULT_NOTICE_MS};
use crate::simulator::DeviceSimulator;
use crate::store::RecordStore;
use crate::types::{InboundRecord, RecordDraft};

/// セッション設定
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub mids: MidTable,
    pub login_delay_ms: u64,
    pub notice_ms: u64,
    /// ログイン画面の工号初期値
    pub default_operator: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mids: MidTable::builtin(),
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            notice_ms: DEFAULT_NOTICE_MS,
            default_operator: None,
        }
    }
}

/// 端末への入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 側面のスキャントリガー
    Trigger,
    /// 時間経過の確認（ログイン待ち・通知の消去）
    Tick,

    EmployeeIdInput(String),
    PasswordInput(String),
    LoginSubmit,

    MidInput(String),
    MidSubmit,
    SearchInput(String),
    OpenRecord(String),

    WeightInput(String),
    StorageCodeInput(String),
    StorageSubmit,

    DetailWeightInput(String),
    DetailStorageCodeInput(String),
    DetailSave,

    /// 入庫フローの取消 / 詳細画面から戻る
    Cancel,
}

/// 表示中の画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login(LoginState),
    Dashboard(DashboardState),
    Capture(CaptureFlow),
    Detail(DetailEdit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Login,
    Dashboard,
    Capture(FlowStep),
    Detail,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Dashboard => write!(f, "dashboard"),
            Self::Capture(FlowStep::Photo) => write!(f, "capture/photo"),
            Self::Capture(FlowStep::WeightAndStorage) => write!(f, "capture/storage"),
            Self::Detail => write!(f, "detail"),
        }
    }
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Login(_) => ScreenKind::Login,
            Screen::Dashboard(_) => ScreenKind::Dashboard,
            Screen::Capture(flow) => ScreenKind::Capture(flow.step()),
            Screen::Detail(_) => ScreenKind::Detail,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    screen: Screen,
    operator: Option<String>,
    store: RecordStore,
    notice: Option<Notice>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let login = LoginState::new(config.default_operator.as_deref());
        Self {
            config,
            screen: Screen::Login(login),
            operator: None,
            store: RecordStore::new(),
            notice: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 次に時間経過を確認すべき時刻
    pub fn next_deadline(&self) -> Option<i64> {
        let login = match &self.screen {
            Screen::Login(login) => login.deadline(),
            _ => None,
        };
        let notice = self.notice.as_ref().map(|n| n.expires_at);
        match (login, notice) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// イベント処理
    pub fn handle(&mut self, event: Event, device: &mut dyn DeviceSimulator) {
        let before = self.kind();
        match event {
            Event::Tick => self.tick(device.now_millis()),
            Event::Trigger => self.trigger(device),
            event => match self.screen {
                Screen::Login(_) => self.handle_login(event, device),
                Screen::Dashboard(_) => self.handle_dashboard(event, device),
                Screen::Capture(_) => self.handle_capture(event, device),
                Screen::Detail(_) => self.handle_detail(event, device),
            },
        }
        let after = self.kind();
        if before != after {
            tracing::debug!(from = %before, to = %after, "画面遷移");
        }
    }

    fn tick(&mut self, now: i64) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
        if let Screen::Login(login) = &self.screen {
            if let Some(operator) = login.poll(now) {
                tracing::info!(operator = %operator, "ログイン");
                self.operator = Some(operator);
                self.screen = Screen::Dashboard(DashboardState::new());
            }
        }
    }

    /// トリガーは表示中の画面だけが解釈する
    fn trigger(&mut self, device: &mut dyn DeviceSimulator) {
        match &mut self.screen {
            Screen::Dashboard(dash) => {
                let outcome = dash.scan(device, &self.config.mids);
                self.apply_scan(outcome, device);
            }
            Screen::Capture(flow) => {
                let progress = flow.trigger(device);
                self.apply_progress(progress, device);
            }
            Screen::Login(_) | Screen::Detail(_) => {}
        }
    }

    fn handle_login(&mut self, event: Event, device: &mut dyn DeviceSimulator) {
        let Screen::Login(login) = &mut self.screen else {
            return;
        };
        match event {
            Event::EmployeeIdInput(text) => login.employee_id = text,
            Event::PasswordInput(text) => login.password = text,
            Event::LoginSubmit => {
                login.submit(device.now_millis(), self.config.login_delay_ms);
            }
            _ => {}
        }
    }

    fn handle_dashboard(&mut self, event: Event, device: &mut dyn DeviceSimulator) {
        let Screen::Dashboard(dash) = &mut self.screen else {
            return;
        };
        match event {
            Event::MidInput(text) => dash.set_mid_input(text),
            Event::SearchInput(text) => dash.set_search_query(text),
            Event::MidSubmit => {
                let outcome = dash.submit(&self.config.mids);
                self.apply_scan(outcome, device);
            }
            Event::OpenRecord(id) => {
                if let Some(record) = self.store.get(&id) {
                    self.screen = Screen::Detail(DetailEdit::open(record.clone()));
                }
            }
            _ => {}
        }
    }

    fn handle_capture(&mut self, event: Event, device: &mut dyn DeviceSimulator) {
        let Screen::Capture(flow) = &mut self.screen else {
            return;
        };
        match event {
            Event::WeightInput(text) => flow.set_weight(text),
            Event::StorageCodeInput(text) => flow.set_storage_code(text),
            Event::StorageSubmit => {
                let progress = flow.submit(device);
                self.apply_progress(progress, device);
            }
            Event::Cancel => {
                tracing::debug!("入庫フロー取消");
                self.to_dashboard();
            }
            _ => {}
        }
    }

    fn handle_detail(&mut self, event: Event, device: &mut dyn DeviceSimulator) {
        let Screen::Detail(edit) = &mut self.screen else {
            return;
        };
        match event {
            Event::DetailWeightInput(text) => edit.weight = text,
            Event::DetailStorageCodeInput(text) => edit.storage_code = text,
            Event::DetailSave => {
                let updated = edit.save();
                match self.store.replace(updated) {
                    Ok(()) => self.notify_success("変更を保存しました", device.now_millis()),
                    Err(err) => tracing::warn!("{}", err),
                }
                self.to_dashboard();
            }
            Event::Cancel => self.to_dashboard(),
            _ => {}
        }
    }

    fn apply_scan(&mut self, outcome: ScanOutcome, device: &mut dyn DeviceSimulator) {
        let now = device.now_millis();
        match outcome {
            ScanOutcome::Matched(mid) => {
                let draft = RecordDraft {
                    mid,
                    operator: self.operator.clone().unwrap_or_default(),
                    timestamp: now,
                };
                self.screen = Screen::Capture(CaptureFlow::new(draft));
                self.notify_success("MIDが一致しました", now);
            }
            ScanOutcome::Rejected(mid) => {
                let message = Error::UnknownMid(mid).to_string();
                self.notice = Some(Notice::error(message, now, self.config.notice_ms));
            }
        }
    }

    fn apply_progress(&mut self, progress: FlowProgress, device: &mut dyn DeviceSimulator) {
        match progress {
            FlowProgress::PhotoTaken { weight_grams } => {
                let message = format!("計量値を取得しました: {}g", weight_grams);
                self.notify_success(message, device.now_millis());
            }
            FlowProgress::Sealed(record) => {
                self.accept(record);
                self.notify_success("前回の入庫を保存しました", device.now_millis());
                self.to_dashboard();
            }
            FlowProgress::Blocked(field) => {
                tracing::debug!(field, "必須項目が未入力のため確定不可");
            }
            FlowProgress::Ignored => {}
        }
    }

    /// 確定レコードをストアへ。同一ミリ秒のIDは後ろにずらす
    fn accept(&mut self, mut record: InboundRecord) {
        let mut stamp = record.timestamp;
        while self.store.contains_id(&record.id) {
            stamp += 1;
            record.id = stamp.to_string();
        }
        self.store.prepend(record);
    }

    fn to_dashboard(&mut self) {
        self.screen = Screen::Dashboard(DashboardState::new());
    }

    fn notify_success(&mut self, message: impl Into<String>, now: i64) {
        self.notice = Some(Notice::success(message, now, self.config.notice_ms));
    }
}
