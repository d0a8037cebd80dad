//! 入庫レコードの型定義
//!
//! - RecordDraft: 入庫フロー中の下書き（MID・担当者・開始時刻のみ）
//! - InboundRecord: 確定済みの入庫レコード

use serde::{Deserialize, Serialize};

/// 写真が撮影されなかった場合のプレースホルダ
pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/150";

/// 確定済み入庫レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRecord {
    /// 確定時に採番されるID（ミリ秒タイムスタンプ文字列）
    pub id: String,
    pub mid: String,
    /// 重量（g）。文字列のまま保持し範囲チェックはしない
    pub weight: String,
    /// 庫位コード `(ZK|YG)-XXXXXXXX`
    pub storage_code: String,
    pub photo_url: String,
    /// 作成時刻（epoch ms）
    pub timestamp: i64,
    pub operator: String,
}

impl InboundRecord {
    /// 一覧表示用の短縮ID（末尾6文字）
    pub fn short_id(&self) -> &str {
        let len = self.id.chars().count();
        if len <= 6 {
            return &self.id;
        }
        let start = self
            .id
            .char_indices()
            .nth(len - 6)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.id[start..]
    }

    /// 検索クエリに一致するか（MIDまたは庫位コードの部分一致、大文字小文字無視）
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.mid.to_lowercase().contains(&q) || self.storage_code.to_lowercase().contains(&q)
    }
}

/// 入庫フロー開始時の下書き
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub mid: String,
    pub operator: String,
    pub timestamp: i64,
}
