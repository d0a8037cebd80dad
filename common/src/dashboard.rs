//! ダッシュボード（MID入力・履歴）
//!
//! スキャンも手入力も同じ照合処理を通る。

use crate::mids::MidTable;
use crate::simulator::DeviceSimulator;
use crate::store::RecordStore;
use crate::types::InboundRecord;

/// MID照合の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// 許可リストに一致。入庫フローを開始する
    Matched(String),
    /// 不一致。エラー表示して入力欄を選択状態に戻す
    Rejected(String),
}

/// 履歴一覧の1行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry<'a> {
    pub record: &'a InboundRecord,
    /// 検索なしの先頭行のみ強調表示
    pub is_latest: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub mid_input: String,
    pub search_query: String,
    show_error: bool,
    select_requested: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_error(&self) -> bool {
        self.show_error
    }

    /// MID入力欄の編集。エラー表示中なら消す
    pub fn set_mid_input(&mut self, text: impl Into<String>) {
        self.mid_input = text.into();
        self.show_error = false;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// 入力欄の内容で照合（Enterキー）
    pub fn submit(&mut self, mids: &MidTable) -> ScanOutcome {
        let candidate = self.mid_input.clone();
        self.validate(candidate, mids)
    }

    /// トリガーによる模擬スキャン
    pub fn scan(&mut self, device: &mut dyn DeviceSimulator, mids: &MidTable) -> ScanOutcome {
        self.show_error = false;
        let code = device.scan_mid(mids);
        self.mid_input = code.clone();
        self.validate(code, mids)
    }

    fn validate(&mut self, candidate: String, mids: &MidTable) -> ScanOutcome {
        match mids.check(&candidate) {
            Ok(()) => {
                self.show_error = false;
                ScanOutcome::Matched(candidate)
            }
            Err(err) => {
                tracing::warn!("{}", err);
                self.show_error = true;
                self.select_requested = true;
                ScanOutcome::Rejected(candidate)
            }
        }
    }

    /// 入力欄の全選択要求を取り出す（UI側で1度だけ処理する）
    pub fn take_select_request(&mut self) -> bool {
        std::mem::take(&mut self.select_requested)
    }

    /// 検索クエリで絞り込んだ履歴
    pub fn history<'a>(&self, store: &'a RecordStore) -> Vec<HistoryEntry<'a>> {
        let searching = !self.search_query.is_empty();
        store
            .filter(&self.search_query)
            .enumerate()
            .map(|(idx, record)| HistoryEntry {
                record,
                is_latest: idx == 0 && !searching,
            })
            .collect()
    }
}
