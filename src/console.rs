//! コンソール端末
//!
//! 端末UIの代わりに、ターミナルの対話入力でセッションを操作する。
//! スキャン入力欄で空のままEnterを押すとハードウェアトリガー扱い。

use std::time::Duration;

use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use pda_inbound_common::{
    format_timestamp, DeviceSimulator, Event, FlowStep, HistoryEntry, Notice, NoticeKind,
    RandomDevice, Screen, ScreenKind, Session,
};

use crate::config::Config;
use crate::error::Result;

/// 履歴の最大表示件数
const HISTORY_LIMIT: usize = 10;

/// 1行入力の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// 空行: スキャントリガー
    Trigger,
    /// 通常の入力値
    Text(String),
    /// `/s 検索語`
    Search(String),
    /// `/o 番号`（1始まり）
    Open(usize),
    /// `w 重量`
    Weight(String),
    Cancel,
    Quit,
    Unknown(String),
}

/// ダッシュボードの入力行
pub fn parse_dashboard_line(line: &str) -> ConsoleInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleInput::Trigger;
    }
    if let Some(rest) = trimmed.strip_prefix("/s") {
        return ConsoleInput::Search(rest.trim().to_string());
    }
    if let Some(rest) = trimmed.strip_prefix("/o") {
        return match rest.trim().parse::<usize>() {
            Ok(n) if n > 0 => ConsoleInput::Open(n),
            _ => ConsoleInput::Unknown(trimmed.to_string()),
        };
    }
    match trimmed {
        "/q" | "/quit" => ConsoleInput::Quit,
        _ if trimmed.starts_with('/') => ConsoleInput::Unknown(trimmed.to_string()),
        _ => ConsoleInput::Text(trimmed.to_string()),
    }
}

/// 入庫フローの入力行
pub fn parse_capture_line(line: &str, step: FlowStep) -> ConsoleInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleInput::Trigger;
    }
    if trimmed == "c" || trimmed == "C" {
        return ConsoleInput::Cancel;
    }
    match step {
        FlowStep::Photo => ConsoleInput::Unknown(trimmed.to_string()),
        FlowStep::WeightAndStorage => {
            if let Some(rest) = trimmed.strip_prefix("w ") {
                ConsoleInput::Weight(rest.trim().to_string())
            } else {
                ConsoleInput::Text(trimmed.to_string())
            }
        }
    }
}

/// 履歴1行の表示
pub fn format_history_line(index: usize, entry: &HistoryEntry<'_>) -> String {
    let marker = if entry.is_latest { "*" } else { " " };
    let record = entry.record;
    format!(
        "{}{:>2}. {}  MID:{}  {}g  {}",
        marker,
        index + 1,
        record.storage_code,
        record.mid,
        record.weight,
        format_timestamp(record.timestamp)
    )
}

fn notice_line(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("✔ {}", notice.message),
        NoticeKind::Error => format!("✖ {}", notice.message),
    }
}

/// 対話セッション
pub struct Console<D: DeviceSimulator> {
    session: Session,
    device: D,
    operator: Option<String>,
    last_notice: Option<Notice>,
}

impl<D: DeviceSimulator> Console<D> {
    pub fn new(session: Session, device: D, operator: Option<String>) -> Self {
        Self {
            session,
            device,
            operator,
            last_notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn send(&mut self, event: Event) {
        self.session.handle(event, &mut self.device);
        self.session.handle(Event::Tick, &mut self.device);
        self.print_notice();
    }

    fn print_notice(&mut self) {
        let current = self.session.notice().cloned();
        if current.is_some() && current != self.last_notice {
            if let Some(notice) = &current {
                println!("  {}", notice_line(notice));
            }
        }
        self.last_notice = current;
    }

    /// ダッシュボードで終了するまで対話を続ける
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.session.kind() {
                ScreenKind::Login => self.login().await?,
                ScreenKind::Dashboard => {
                    if !self.dashboard()? {
                        return Ok(());
                    }
                }
                ScreenKind::Capture(step) => self.capture(step)?,
                ScreenKind::Detail => self.detail()?,
            }
        }
    }

    async fn login(&mut self) -> Result<()> {
        println!("\n📟 ログイン");
        let employee_id = match self.operator.take() {
            Some(id) => id,
            None => {
                let prefill = match self.session.screen() {
                    Screen::Login(login) => login.employee_id.clone(),
                    _ => String::new(),
                };
                let mut input = Input::<String>::new().with_prompt("工号").allow_empty(true);
                if !prefill.is_empty() {
                    input = input.default(prefill);
                }
                let id = input.interact_text()?;
                let password = Password::new()
                    .with_prompt("密码")
                    .allow_empty_password(true)
                    .interact()?;
                self.send(Event::PasswordInput(password));
                id
            }
        };
        self.send(Event::EmployeeIdInput(employee_id));
        self.send(Event::LoginSubmit);

        let Some(deadline) = self.session.next_deadline() else {
            println!("  工号を入力してください");
            return Ok(());
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("ログイン中...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        while self.session.kind() == ScreenKind::Login {
            let wait = (deadline - self.device.now_millis()).max(1) as u64;
            tokio::time::sleep(Duration::from_millis(wait)).await;
            self.send(Event::Tick);
        }
        spinner.finish_and_clear();

        if let Some(operator) = self.session.operator() {
            println!("✔ ログインしました: {}", operator);
        }
        Ok(())
    }

    /// false を返したら終了
    fn dashboard(&mut self) -> Result<bool> {
        self.render_dashboard();

        let line: String = Input::new()
            .with_prompt("MID (空Enter:スキャン /s 検索 /o 番号 /q 終了)")
            .allow_empty(true)
            .interact_text()?;

        match parse_dashboard_line(&line) {
            ConsoleInput::Trigger => self.send(Event::Trigger),
            ConsoleInput::Text(mid) => {
                self.send(Event::MidInput(mid));
                self.send(Event::MidSubmit);
            }
            ConsoleInput::Search(query) => self.send(Event::SearchInput(query)),
            ConsoleInput::Open(n) => {
                let id = match self.session.screen() {
                    Screen::Dashboard(dash) => dash
                        .history(self.session.store())
                        .get(n - 1)
                        .map(|e| e.record.id.clone()),
                    _ => None,
                };
                match id {
                    Some(id) => self.send(Event::OpenRecord(id)),
                    None => println!("  {}番の履歴はありません", n),
                }
            }
            ConsoleInput::Quit => return Ok(false),
            _ => println!("  不明な入力です"),
        }
        Ok(true)
    }

    fn render_dashboard(&self) {
        let Screen::Dashboard(dash) = self.session.screen() else {
            return;
        };
        println!(
            "\n🏠 ダッシュボード  担当: {}  入庫数: {}",
            self.session.operator().unwrap_or("-"),
            self.session.store().len()
        );
        if !dash.search_query.is_empty() {
            println!("  検索: \"{}\"", dash.search_query);
        }
        let history = dash.history(self.session.store());
        if history.is_empty() {
            println!("  （履歴なし）");
        }
        for (index, entry) in history.iter().take(HISTORY_LIMIT).enumerate() {
            println!("  {}", format_history_line(index, entry));
        }
        if history.len() > HISTORY_LIMIT {
            println!("  ...他 {}件", history.len() - HISTORY_LIMIT);
        }
    }

    fn capture(&mut self, step: FlowStep) -> Result<()> {
        let Screen::Capture(flow) = self.session.screen() else {
            return Ok(());
        };
        let prompt = match step {
            FlowStep::Photo => {
                println!("\n📷 撮影  MID: {}", flow.draft().mid);
                "空Enter:撮影 c:取消"
            }
            FlowStep::WeightAndStorage => {
                println!(
                    "\n⚖ 重量: {}g  庫位: {}",
                    if flow.weight.is_empty() { "-" } else { flow.weight.as_str() },
                    if flow.storage_code.is_empty() { "-" } else { flow.storage_code.as_str() }
                );
                "庫位コード (空Enter:スキャン w 重量:重量修正 c:取消)"
            }
        };

        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        match parse_capture_line(&line, step) {
            ConsoleInput::Trigger => self.send(Event::Trigger),
            ConsoleInput::Cancel => {
                self.send(Event::Cancel);
                println!("  → 取消しました");
            }
            ConsoleInput::Weight(weight) => self.send(Event::WeightInput(weight)),
            ConsoleInput::Text(code) => {
                self.send(Event::StorageCodeInput(code));
                self.send(Event::StorageSubmit);
            }
            _ => println!("  不明な入力です"),
        }
        Ok(())
    }

    fn detail(&mut self) -> Result<()> {
        let Screen::Detail(edit) = self.session.screen() else {
            return Ok(());
        };
        let record = edit.original();
        println!("\n📄 詳細  ID: {}", record.short_id());
        println!("  MID:    {}", record.mid);
        println!("  写真:   {}", record.photo_url);
        println!("  作成:   {}", edit.created_at());
        println!("  担当:   {}", record.operator);

        let weight: String = Input::new()
            .with_prompt("重量 (g)")
            .default(edit.weight.clone())
            .allow_empty(true)
            .interact_text()?;
        let code: String = Input::new()
            .with_prompt("庫位コード")
            .default(edit.storage_code.clone())
            .allow_empty(true)
            .interact_text()?;

        self.send(Event::DetailWeightInput(weight));
        self.send(Event::DetailStorageCodeInput(code));

        if let Screen::Detail(edit) = self.session.screen() {
            if !edit.storage_code_looks_valid() {
                println!("  ⚠ 庫位コードの形式が (ZK|YG)-XXXXXXXX ではありません");
            }
        }

        let choice = Select::new()
            .with_prompt("操作")
            .items(&["保存", "取消"])
            .default(0)
            .interact()?;
        if choice == 0 {
            self.send(Event::DetailSave);
        } else {
            self.send(Event::Cancel);
        }
        Ok(())
    }
}

/// `run` サブコマンド
pub async fn run_session(
    config: &Config,
    operator: Option<String>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let device = match seed {
        Some(seed) => RandomDevice::with_seed(seed),
        None => RandomDevice::new(),
    }
    .scan_hit_rate(config.scan_hit_rate);

    let session = Session::new(config.session_config());
    let mut console = Console::new(session, device, operator);
    console.run().await?;

    let store = console.session().store();
    println!("\n✅ 終了  入庫数: {}", store.len());
    if json {
        println!("{}", serde_json::to_string_pretty(store.records())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pda_inbound_common::{InboundRecord, ScriptedDevice, SessionConfig};

    #[test]
    fn test_parse_dashboard_line() {
        assert_eq!(parse_dashboard_line(""), ConsoleInput::Trigger);
        assert_eq!(parse_dashboard_line("   "), ConsoleInput::Trigger);
        assert_eq!(
            parse_dashboard_line(" 500983514986 "),
            ConsoleInput::Text("500983514986".into())
        );
        assert_eq!(parse_dashboard_line("/s ZK"), ConsoleInput::Search("ZK".into()));
        assert_eq!(parse_dashboard_line("/s"), ConsoleInput::Search(String::new()));
        assert_eq!(parse_dashboard_line("/o 2"), ConsoleInput::Open(2));
        assert!(matches!(parse_dashboard_line("/o 0"), ConsoleInput::Unknown(_)));
        assert!(matches!(parse_dashboard_line("/o x"), ConsoleInput::Unknown(_)));
        assert_eq!(parse_dashboard_line("/q"), ConsoleInput::Quit);
        assert!(matches!(parse_dashboard_line("/x"), ConsoleInput::Unknown(_)));
    }

    #[test]
    fn test_parse_capture_line() {
        assert_eq!(parse_capture_line("", FlowStep::Photo), ConsoleInput::Trigger);
        assert_eq!(parse_capture_line("c", FlowStep::Photo), ConsoleInput::Cancel);
        assert!(matches!(parse_capture_line("ZK-1", FlowStep::Photo), ConsoleInput::Unknown(_)));

        let step = FlowStep::WeightAndStorage;
        assert_eq!(parse_capture_line("", step), ConsoleInput::Trigger);
        assert_eq!(parse_capture_line("w 450", step), ConsoleInput::Weight("450".into()));
        assert_eq!(
            parse_capture_line("ZK-ab3dfg7h", step),
            ConsoleInput::Text("ZK-ab3dfg7h".into())
        );
        assert_eq!(parse_capture_line("C", step), ConsoleInput::Cancel);
    }

    #[test]
    fn test_format_history_line() {
        let record = InboundRecord {
            id: "1".into(),
            mid: "500983514986".into(),
            weight: "450".into(),
            storage_code: "ZK-ab3dfg7h".into(),
            photo_url: "p".into(),
            timestamp: 0,
            operator: "A".into(),
        };
        let latest = HistoryEntry { record: &record, is_latest: true };
        let line = format_history_line(0, &latest);
        assert!(line.starts_with("* 1. ZK-ab3dfg7h"));
        assert!(line.contains("MID:500983514986"));
        assert!(line.contains("450g"));

        let older = HistoryEntry { record: &record, is_latest: false };
        assert!(format_history_line(11, &older).starts_with(" 12."));
    }

    #[test]
    fn test_console_send_drives_session() {
        let session = Session::new(SessionConfig {
            login_delay_ms: 0,
            ..Default::default()
        });
        let device = ScriptedDevice::new(0).with_codes(["YG-ABCDEFGH"]);
        let mut console = Console::new(session, device, None);

        console.send(Event::EmployeeIdInput("A1024".into()));
        console.send(Event::LoginSubmit);
        assert_eq!(console.session().kind(), ScreenKind::Dashboard);

        console.send(Event::MidInput("500983514986".into()));
        console.send(Event::MidSubmit);
        console.send(Event::Trigger);
        console.send(Event::Trigger);

        let store = console.session().store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].storage_code, "YG-ABCDEFGH");
        assert_eq!(store.records()[0].operator, "A1024");
    }
}
